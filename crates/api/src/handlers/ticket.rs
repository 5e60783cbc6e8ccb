//! Handlers for ticket sales and cancellations.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;
use busline_core::error::CoreError;
use busline_core::sale_wizard::validate_passengers;
use busline_core::status::{validate_transition, ScheduleStatus, SeatStatus, TicketStatus};
use busline_core::types::DbId;
use busline_db::models::bus::BusSeat;
use busline_db::models::ticket::{CreateTicketBatch, NewTicket, Ticket, TicketWithPassenger};
use busline_db::repositories::{BusRepo, CustomerRepo, ScheduleRepo, TicketRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::schedule::find_schedule;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/tickets
///
/// Sells every requested seat or none. Tickets and passenger-list rows are
/// written in one transaction; a seat already sold for the schedule is a 409.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateTicketBatch>,
) -> AppResult<Json<DataResponse<Vec<TicketWithPassenger>>>> {
    input.validate()?;

    let schedule = find_schedule(&state, input.schedule_id).await?;
    ensure_on_sale(&schedule.status)?;
    let bus_id = schedule.bus_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "No bus is assigned to this schedule yet".to_string(),
        ))
    })?;
    CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: input.customer_id,
        }))?;

    let seat_ids = requested_seat_ids(&input)?;
    validate_passengers(&seat_ids, &input.seats)?;

    let seats: HashMap<DbId, BusSeat> = BusRepo::find_seats(&state.pool, bus_id, &seat_ids)
        .await?
        .into_iter()
        .map(|seat| (seat.id, seat))
        .collect();

    let mut lines = Vec::with_capacity(input.seats.len());
    for selection in &input.seats {
        let seat = seats.get(&selection.bus_seat_id).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Seat {} does not belong to the bus assigned to this schedule",
                selection.bus_seat_id
            )))
        })?;
        ensure_sellable(seat)?;
        lines.push(NewTicket {
            bus_seat_id: seat.id,
            seat_number: seat.seat_number.clone(),
            price: selection.price.unwrap_or(schedule.price),
            passenger_name: selection.passenger_name.clone(),
            passenger_document: selection.passenger_document.clone(),
        });
    }

    let mut tx = state.pool.begin().await?;
    // Hold the schedule so its status cannot change mid-sale.
    let locked = ScheduleRepo::lock_for_update(&mut tx, schedule.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: schedule.id,
        }))?;
    ensure_on_sale(&locked.status)?;

    let created = TicketRepo::create_batch(
        &mut tx,
        schedule.id,
        input.customer_id,
        input.notes.as_deref(),
        &lines,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        schedule_id = %schedule.id,
        customer_id = %input.customer_id,
        tickets = created.len(),
        "Tickets sold",
    );
    Ok(Json(DataResponse { data: created }))
}

/// GET /api/v1/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ticket>>> {
    let ticket = find_ticket(&state, id).await?;
    Ok(Json(DataResponse { data: ticket }))
}

/// PATCH /api/v1/tickets/{id}/cancel
///
/// The seat becomes sellable again and the passenger leaves the manifest.
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Ticket>>> {
    let ticket = find_ticket(&state, id).await?;
    let from = TicketStatus::from_str_db(&ticket.status)?;
    validate_transition(from, TicketStatus::Cancelled, from.valid_transitions())?;

    let cancelled = TicketRepo::cancel(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Ticket {id} was cancelled concurrently"
        )))
    })?;

    tracing::info!(ticket_id = %id, schedule_id = %cancelled.schedule_id, "Ticket cancelled");
    Ok(Json(DataResponse { data: cancelled }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_ticket(state: &AppState, id: DbId) -> AppResult<Ticket> {
    TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ticket", id }))
}

fn ensure_on_sale(status: &str) -> Result<(), CoreError> {
    let status = ScheduleStatus::from_str_db(status)?;
    if status.accepts_sales() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Tickets cannot be sold for a schedule that is {status}"
        )))
    }
}

/// Seat ids in request order, rejecting repeats.
fn requested_seat_ids(input: &CreateTicketBatch) -> Result<Vec<DbId>, CoreError> {
    let mut seen = HashSet::with_capacity(input.seats.len());
    let mut ids = Vec::with_capacity(input.seats.len());
    for selection in &input.seats {
        if !seen.insert(selection.bus_seat_id) {
            return Err(CoreError::Validation(format!(
                "Seat {} is requested more than once",
                selection.bus_seat_id
            )));
        }
        ids.push(selection.bus_seat_id);
    }
    Ok(ids)
}

fn ensure_sellable(seat: &BusSeat) -> Result<(), CoreError> {
    let status = SeatStatus::from_str_db(&seat.status)?;
    if seat.is_active && status == SeatStatus::Available {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Seat {} is not available for sale ({status})",
            seat.seat_number
        )))
    }
}
