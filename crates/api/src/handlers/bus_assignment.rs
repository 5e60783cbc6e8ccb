//! Handlers for bus assignments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use busline_core::assignment::{TimeWindow, SCHEDULE_CONFLICT};
use busline_core::error::CoreError;
use busline_core::status::{validate_transition, AssignmentStatus};
use busline_core::types::DbId;
use busline_db::models::bus_assignment::{
    BusAssignment, CreateBusAssignment, UpdateAssignmentStatus,
};
use busline_db::repositories::bus_assignment_repo::AssignmentOutcome;
use busline_db::repositories::BusAssignmentRepo;

use crate::error::{classify_sqlx_error, AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::route::find_route;
use crate::handlers::schedule::find_schedule;
use crate::query::BusFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/bus-assignments
///
/// Windows are closed intervals, so an assignment that starts exactly when
/// another one ends is a conflict.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateBusAssignment>,
) -> AppResult<Json<DataResponse<BusAssignment>>> {
    TimeWindow::new(input.start_time, input.end_time)?;

    find_route(&state, input.route_id).await?;
    let schedule = find_schedule(&state, input.schedule_id).await?;
    if schedule.route_id != input.route_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Schedule {} does not run on route {}",
            schedule.id, input.route_id
        ))));
    }

    let outcome = BusAssignmentRepo::create_checked(&state.pool, &input)
        .await
        .map_err(persistence_error)?;

    let assignment = match outcome {
        AssignmentOutcome::Created(assignment) => assignment,
        AssignmentOutcome::BusNotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Bus",
                id: input.bus_id,
            }));
        }
        AssignmentOutcome::Overlaps(taken) => {
            tracing::debug!(bus_id = %input.bus_id, overlapping = taken.len(), "Assignment rejected");
            return Err(AppError::Core(CoreError::Conflict(SCHEDULE_CONFLICT.to_string())));
        }
    };

    tracing::info!(
        assignment_id = %assignment.id,
        bus_id = %assignment.bus_id,
        schedule_id = %assignment.schedule_id,
        start = %assignment.start_time,
        end = %assignment.end_time,
        "Bus assigned",
    );
    Ok(Json(DataResponse { data: assignment }))
}

/// GET /api/v1/bus-assignments
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<BusAssignment>>>> {
    let assignments = BusAssignmentRepo::list(&state.pool, params.bus_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// GET /api/v1/bus-assignments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BusAssignment>>> {
    let assignment = find_assignment(&state, id).await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// PATCH /api/v1/bus-assignments/{id}/status
///
/// Completing or cancelling frees the window; cancelling also detaches the
/// bus from the schedule.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateAssignmentStatus>,
) -> AppResult<Json<DataResponse<BusAssignment>>> {
    let assignment = find_assignment(&state, id).await?;
    let from = AssignmentStatus::from_str_db(&assignment.status)?;
    let to = AssignmentStatus::from_str_db(&input.status)?;
    validate_transition(from, to, from.valid_transitions())?;

    let updated = BusAssignmentRepo::finish(&state.pool, id, to.as_str())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Assignment {id} is no longer active"
            )))
        })?;

    tracing::info!(assignment_id = %id, from = %from, to = %to, "Assignment status changed");
    Ok(Json(DataResponse { data: updated }))
}

async fn find_assignment(state: &AppState, id: DbId) -> AppResult<BusAssignment> {
    BusAssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusAssignment",
            id,
        }))
}

/// Constraint violations keep their usual mapping (409 / 404); any other
/// database failure on this path is reported as a bad request.
fn persistence_error(err: sqlx::Error) -> AppError {
    let (status, _, _) = classify_sqlx_error(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR && err.as_database_error().is_some() {
        tracing::error!(error = %err, "Bus assignment insert failed");
        AppError::BadRequest("Failed to create bus assignment".to_string())
    } else {
        AppError::Database(err)
    }
}
