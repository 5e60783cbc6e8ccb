//! Handlers for recurring route schedules.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use validator::Validate;
use busline_core::dependencies::ensure_no_dependencies;
use busline_core::error::CoreError;
use busline_core::schedule_expansion::{normalize_operating_days, parse_departure_time};
use busline_core::types::DbId;
use busline_db::models::route::{
    CreateRouteSchedule, RouteSchedule, RouteSchedulePattern, UpdateRouteSchedule,
};
use busline_db::repositories::RouteScheduleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::route::find_route;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/route-schedules
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateRouteSchedule>,
) -> AppResult<(StatusCode, Json<DataResponse<RouteSchedule>>)> {
    input.validate()?;
    find_route(&state, input.route_id).await?;

    let pattern = build_pattern(
        &input.departure_time,
        &input.operating_days,
        input.season_start,
        input.season_end,
    )?;
    let route_schedule = RouteScheduleRepo::create(&state.pool, input.route_id, &pattern).await?;

    tracing::info!(
        route_schedule_id = %route_schedule.id,
        route_id = %route_schedule.route_id,
        days = ?route_schedule.operating_days,
        "Route schedule created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: route_schedule })))
}

/// GET /api/v1/routes/{route_id}/route-schedules
pub async fn list_by_route(
    State(state): State<AppState>,
    Path(route_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RouteSchedule>>>> {
    find_route(&state, route_id).await?;
    let items = RouteScheduleRepo::list_by_route(&state.pool, route_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/route-schedules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RouteSchedule>>> {
    let route_schedule = find_route_schedule(&state, id).await?;
    Ok(Json(DataResponse { data: route_schedule }))
}

/// PUT /api/v1/route-schedules/{id}
///
/// Omitted fields keep their stored value. Already generated schedules are
/// not touched.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateRouteSchedule>,
) -> AppResult<Json<DataResponse<RouteSchedule>>> {
    input.validate()?;
    let existing = find_route_schedule(&state, id).await?;

    let departure_time = match input.departure_time.as_deref() {
        Some(raw) => parse_departure_time(raw)?,
        None => existing.departure_time,
    };
    let operating_days = match &input.operating_days {
        Some(days) => lowercase_days(days)?,
        None => existing.operating_days,
    };
    let season_start = input.season_start.or(existing.season_start);
    let season_end = input.season_end.or(existing.season_end);
    validate_season(season_start, season_end)?;

    let pattern = RouteSchedulePattern {
        departure_time,
        operating_days,
        season_start,
        season_end,
    };
    let route_schedule = RouteScheduleRepo::update(&state.pool, id, &pattern, input.active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RouteSchedule",
            id,
        }))?;
    Ok(Json(DataResponse { data: route_schedule }))
}

/// DELETE /api/v1/route-schedules/{id}
///
/// Hard delete, only while no schedule was generated from the pattern.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    find_route_schedule(&state, id).await?;

    let counts = RouteScheduleRepo::dependency_counts(&state.pool, id).await?;
    ensure_no_dependencies("RouteSchedule", counts)?;

    if RouteScheduleRepo::delete(&state.pool, id).await? {
        tracing::info!(route_schedule_id = %id, "Route schedule deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "RouteSchedule",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_route_schedule(state: &AppState, id: DbId) -> AppResult<RouteSchedule> {
    RouteScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RouteSchedule",
            id,
        }))
}

fn build_pattern(
    departure_time: &str,
    operating_days: &[String],
    season_start: Option<NaiveDate>,
    season_end: Option<NaiveDate>,
) -> Result<RouteSchedulePattern, CoreError> {
    validate_season(season_start, season_end)?;
    Ok(RouteSchedulePattern {
        departure_time: parse_departure_time(departure_time)?,
        operating_days: lowercase_days(operating_days)?,
        season_start,
        season_end,
    })
}

/// Canonical stored form: lowercase, de-duplicated, Monday first.
fn lowercase_days(days: &[String]) -> Result<Vec<String>, CoreError> {
    Ok(normalize_operating_days(days)?
        .into_iter()
        .map(|d| d.as_str().to_string())
        .collect())
}

fn validate_season(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), CoreError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(CoreError::Validation(format!(
            "season_end ({end}) must not be before season_start ({start})"
        ))),
        _ => Ok(()),
    }
}
