//! Tests for `AppError` → HTTP response mapping.
//!
//! No server or database: errors are built and rendered in-process.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use busline_api::error::AppError;
use busline_core::dependencies::DependencyCount;
use busline_core::error::CoreError;
use http_body_util::BodyExt;
use uuid::Uuid;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let id = Uuid::nil();
    let err = AppError::Core(CoreError::NotFound { entity: "Bus", id });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Bus with id {id} not found"));
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("rows must be positive".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "rows must be positive");
}

#[tokio::test]
async fn invalid_input_carries_details() {
    let err = AppError::Core(CoreError::invalid(
        "Invalid seat tier IDs",
        serde_json::json!({ "invalid_seat_count": 3 }),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid seat tier IDs");
    assert_eq!(json["details"]["invalid_seat_count"], 3);
}

#[tokio::test]
async fn has_dependencies_lists_counts() {
    let err = AppError::Core(CoreError::HasDependencies {
        entity: "Company",
        dependencies: vec![DependencyCount::new("buses", 2)],
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "HAS_DEPENDENCIES");
    assert_eq!(json["dependencies"][0]["kind"], "buses");
    assert_eq!(json["dependencies"][0]["count"], 2);
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("bus already assigned".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("No schedules could be generated".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "No schedules could be generated");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalError("password=hunter2".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("hunter2"));
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[test]
fn core_errors_convert_into_the_core_variant() {
    let err: AppError = CoreError::Conflict("Conflicto de horario".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Conflict(ref msg)) if msg == "Conflicto de horario");
}

#[test]
fn sqlx_errors_convert_into_the_database_variant() {
    let err: AppError = sqlx::Error::RowNotFound.into();
    assert_matches!(err, AppError::Database(sqlx::Error::RowNotFound));
}
