//! Handlers for buses and their materialized seats.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use busline_core::error::CoreError;
use busline_core::plate::normalize_plate;
use busline_core::seat_matrix::SeatTemplateMatrix;
use busline_core::status::{MaintenanceStatus, SeatStatus};
use busline_core::types::DbId;
use busline_db::models::bus::{Bus, BusSeat, BusWithSeats, CreateBus, UpdateBus, UpdateBusSeat};
use busline_db::repositories::bus_repo::NewBus;
use busline_db::repositories::{BusAssignmentRepo, BusRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::bus_template::find_template;
use crate::handlers::company::find_company;
use crate::handlers::seat_tier::ensure_company_tiers;
use crate::query::CompanyFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/buses
///
/// Snapshots the template layout onto the bus and creates one seat row per
/// non-empty position, all in one transaction.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateBus>,
) -> AppResult<Json<DataResponse<BusWithSeats>>> {
    input.validate()?;
    find_company(&state, input.company_id).await?;

    let template = find_template(&state, input.template_id).await?;
    if template.company_id != input.company_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BusTemplate",
            id: input.template_id,
        }));
    }

    let matrix = SeatTemplateMatrix::from_json(&template.seat_template_matrix)?;
    let seats = matrix.materialize()?;
    ensure_company_tiers(&state, input.company_id, &matrix).await?;

    let plate_number = normalize_plate(&input.plate_number)?;
    let new_bus = NewBus {
        company_id: input.company_id,
        template_id: template.id,
        plate_number: &plate_number,
        model: input.model.as_deref(),
        year: input.year,
        seat_matrix: &template.seat_template_matrix,
    };
    let created = BusRepo::create_with_seats(&state.pool, &new_bus, &seats).await?;

    tracing::info!(
        bus_id = %created.bus.id,
        plate = %created.bus.plate_number,
        seats = created.seats.len(),
        "Bus created",
    );

    Ok(Json(DataResponse { data: created }))
}

/// GET /api/v1/buses
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CompanyFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Bus>>>> {
    let buses = BusRepo::list(&state.pool, params.company_id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: buses }))
}

/// GET /api/v1/buses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BusWithSeats>>> {
    let bus = find_bus(&state, id).await?;
    let seats = BusRepo::list_seats(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: BusWithSeats { bus, seats },
    }))
}

/// PUT /api/v1/buses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateBus>,
) -> AppResult<Json<DataResponse<Bus>>> {
    input.validate()?;

    let plate_number = input
        .plate_number
        .as_deref()
        .map(normalize_plate)
        .transpose()?;
    let maintenance_status = input
        .maintenance_status
        .as_deref()
        .map(MaintenanceStatus::from_str_db)
        .transpose()?;

    let bus = BusRepo::update(
        &state.pool,
        id,
        plate_number.as_deref(),
        input.model.as_deref(),
        input.year,
        maintenance_status.map(MaintenanceStatus::as_str),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Bus", id }))?;

    tracing::info!(bus_id = %id, "Bus updated");
    Ok(Json(DataResponse { data: bus }))
}

/// DELETE /api/v1/buses/{id}
///
/// Soft delete; refused while the bus still has active assignments.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    find_bus(&state, id).await?;

    let active = BusAssignmentRepo::count_active_for_bus(&state.pool, id).await?;
    if active > 0 {
        return Err(AppError::BadRequest(format!(
            "Bus has {active} active assignment(s); complete or cancel them first"
        )));
    }

    if BusRepo::deactivate(&state.pool, id).await? {
        tracing::info!(bus_id = %id, "Bus retired");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Bus", id }))
    }
}

/// PATCH /api/v1/buses/{id}/seats/{seat_id}
pub async fn update_seat(
    State(state): State<AppState>,
    Path((bus_id, seat_id)): Path<(DbId, DbId)>,
    ApiJson(input): ApiJson<UpdateBusSeat>,
) -> AppResult<Json<DataResponse<BusSeat>>> {
    if let Some(status) = input.status.as_deref() {
        SeatStatus::from_str_db(status)?;
    }

    let seat = BusRepo::update_seat(&state.pool, bus_id, seat_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusSeat",
            id: seat_id,
        }))?;

    tracing::info!(bus_id = %bus_id, seat_id = %seat_id, status = %seat.status, "Bus seat updated");
    Ok(Json(DataResponse { data: seat }))
}

pub(crate) async fn find_bus(state: &AppState, id: DbId) -> AppResult<Bus> {
    BusRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Bus", id }))
}
