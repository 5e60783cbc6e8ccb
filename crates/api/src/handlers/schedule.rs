//! Handlers for dated schedules: expansion, listing and status changes.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use validator::Validate;
use busline_core::error::CoreError;
use busline_core::schedule_expansion::{
    expand, normalize_operating_days, validate_window, RecurringPattern,
};
use busline_core::status::{validate_transition, ScheduleStatus};
use busline_core::types::DbId;
use busline_db::models::schedule::{
    GenerateSchedules, NewSchedule, Schedule, ScheduleFilter, UpdateScheduleStatus,
};
use busline_db::models::ticket::{Passenger, Ticket};
use busline_db::repositories::{ScheduleRepo, TicketRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::route::find_route;
use crate::handlers::route_schedule::find_route_schedule;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a schedule expansion request.
#[derive(Debug, Serialize)]
pub struct GenerateSchedulesResponse {
    pub data: Vec<Schedule>,
    /// Days that already had a schedule for this pattern.
    pub skipped_existing: usize,
    /// Days whose insert failed; each failure is logged.
    pub failed: usize,
}

/// POST /api/v1/schedules
///
/// Expands a route schedule over `[start_date, end_date]`. Re-running the
/// same window creates nothing new.
pub async fn generate(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<GenerateSchedules>,
) -> AppResult<Json<GenerateSchedulesResponse>> {
    input.validate()?;

    let route = find_route(&state, input.route_id).await?;
    let route_schedule = find_route_schedule(&state, input.route_schedule_id).await?;
    if route_schedule.route_id != route.id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Route schedule {} does not belong to route {}",
            route_schedule.id, route.id
        ))));
    }
    validate_window(
        input.start_date,
        input.end_date,
        state.config.max_expansion_days,
    )?;

    let pattern = RecurringPattern {
        departure_time: route_schedule.departure_time,
        operating_days: normalize_operating_days(&route_schedule.operating_days)?,
        estimated_duration_minutes: route.estimated_duration,
    };
    let trips = expand(&pattern, input.start_date, input.end_date);

    let mut created = Vec::with_capacity(trips.len());
    let mut skipped_existing = 0;
    let mut failed = 0;
    for trip in &trips {
        let new_schedule = NewSchedule {
            route_id: route.id,
            route_schedule_id: route_schedule.id,
            departure_date: trip.departure,
            estimated_arrival_time: trip.estimated_arrival,
            price: input.price,
        };
        match ScheduleRepo::insert_if_absent(&state.pool, &new_schedule).await {
            Ok(Some(schedule)) => created.push(schedule),
            Ok(None) => skipped_existing += 1,
            Err(e) => {
                tracing::warn!(
                    route_schedule_id = %route_schedule.id,
                    service_date = %trip.service_date,
                    error = %e,
                    "Failed to create schedule",
                );
                failed += 1;
            }
        }
    }

    if created.is_empty() && skipped_existing == 0 {
        return Err(AppError::BadRequest(
            "No schedules could be generated for the specified date range".to_string(),
        ));
    }

    tracing::info!(
        route_id = %route.id,
        route_schedule_id = %route_schedule.id,
        created = created.len(),
        skipped_existing,
        failed,
        "Schedules generated",
    );

    Ok(Json(GenerateSchedulesResponse {
        data: created,
        skipped_existing,
        failed,
    }))
}

/// GET /api/v1/schedules
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ScheduleFilter>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let schedules = ScheduleRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/v1/schedules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let schedule = find_schedule(&state, id).await?;
    Ok(Json(DataResponse { data: schedule }))
}

/// PATCH /api/v1/schedules/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateScheduleStatus>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let schedule = find_schedule(&state, id).await?;
    let from = ScheduleStatus::from_str_db(&schedule.status)?;
    let to = ScheduleStatus::from_str_db(&input.status)?;
    if from.is_terminal() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Schedule {id} is {from} and can no longer change status"
        ))));
    }
    validate_transition(from, to, from.valid_transitions())?;

    let updated = ScheduleRepo::update_status(&state.pool, id, from.as_str(), to.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Schedule {id} changed status while this request was in flight"
            )))
        })?;

    tracing::info!(schedule_id = %id, from = %from, to = %to, "Schedule status changed");
    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/schedules/{id}/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Ticket>>>> {
    find_schedule(&state, id).await?;
    let tickets = TicketRepo::list_by_schedule(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// GET /api/v1/schedules/{id}/passengers
pub async fn list_passengers(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Passenger>>>> {
    find_schedule(&state, id).await?;
    let passengers = TicketRepo::passengers_for_schedule(&state.pool, id).await?;
    Ok(Json(DataResponse { data: passengers }))
}

pub(crate) async fn find_schedule(state: &AppState, id: DbId) -> AppResult<Schedule> {
    ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))
}
