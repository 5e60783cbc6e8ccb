//! Handlers for `/routes`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use busline_core::dependencies::ensure_no_dependencies;
use busline_core::error::CoreError;
use busline_core::types::DbId;
use busline_db::models::route::{CreateRoute, Route, UpdateRoute};
use busline_db::repositories::{LocationRepo, RouteRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/routes
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateRoute>,
) -> AppResult<(StatusCode, Json<DataResponse<Route>>)> {
    input.validate()?;
    if input.origin_id == input.destination_id {
        return Err(AppError::Core(CoreError::Validation(
            "origin_id and destination_id must differ".to_string(),
        )));
    }
    for id in [input.origin_id, input.destination_id] {
        LocationRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Location",
                id,
            }))?;
    }

    let route = RouteRepo::create(&state.pool, &input).await?;
    tracing::info!(
        route_id = %route.id,
        duration_minutes = route.estimated_duration,
        "Route created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: route })))
}

/// GET /api/v1/routes
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Route>>>> {
    let routes = RouteRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: routes }))
}

/// GET /api/v1/routes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Route>>> {
    let route = find_route(&state, id).await?;
    Ok(Json(DataResponse { data: route }))
}

/// PUT /api/v1/routes/{id}
///
/// Duration changes only affect schedules generated afterwards.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateRoute>,
) -> AppResult<Json<DataResponse<Route>>> {
    input.validate()?;
    let route = RouteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Route", id }))?;
    Ok(Json(DataResponse { data: route }))
}

/// DELETE /api/v1/routes/{id}
///
/// Soft-deactivates the route unless it still has running schedules or
/// active bus assignments.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Route>>> {
    find_route(&state, id).await?;

    let counts = RouteRepo::dependency_counts(&state.pool, id).await?;
    ensure_no_dependencies("Route", counts)?;

    let route = RouteRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Route", id }))?;
    tracing::info!(route_id = %id, "Route deactivated");
    Ok(Json(DataResponse { data: route }))
}

pub(crate) async fn find_route(state: &AppState, id: DbId) -> AppResult<Route> {
    RouteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Route", id }))
}
