//! Request extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use busline_core::error::CoreError;
use serde_json::json;

use crate::error::AppError;

/// `Json<T>` whose rejections render through [`AppError`].
///
/// Missing fields, wrong types, malformed JSON and a missing content type
/// all become `400 VALIDATION_ERROR` with a `details` payload.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "invalid_fields",
            JsonRejection::JsonSyntaxError(_) => "malformed_json",
            JsonRejection::MissingJsonContentType(_) => "missing_content_type",
            _ => "unreadable_body",
        };
        AppError::Core(CoreError::invalid(
            "Invalid request body",
            json!({ "kind": kind, "reason": rejection.body_text() }),
        ))
    }
}
