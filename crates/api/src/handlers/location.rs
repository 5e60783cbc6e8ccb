//! Handlers for `/locations`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use busline_db::models::location::{CreateLocation, Location};
use busline_db::repositories::LocationRepo;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/locations
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateLocation>,
) -> AppResult<(StatusCode, Json<DataResponse<Location>>)> {
    input.validate()?;
    let location = LocationRepo::create(&state.pool, &input).await?;
    tracing::info!(location_id = %location.id, "Location created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

/// GET /api/v1/locations
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Location>>>> {
    let locations = LocationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: locations }))
}
