//! Tickets and the boarding manifest written alongside them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::sale_wizard::PassengerSelection;
use busline_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `tickets` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ticket {
    pub id: DbId,
    pub schedule_id: DbId,
    pub customer_id: DbId,
    pub bus_seat_id: DbId,
    pub status: String,
    pub price: f64,
    pub purchased_at: Timestamp,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `passenger_list` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Passenger {
    pub id: DbId,
    pub ticket_id: DbId,
    pub schedule_id: DbId,
    pub seat_number: String,
    pub passenger_name: String,
    pub passenger_document: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// Bulk sale request: one ticket per entry in `seats`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketBatch {
    pub schedule_id: DbId,
    pub customer_id: DbId,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub seats: Vec<PassengerSelection>,
}

/// A resolved ticket line: seat checked against the bus, price settled.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub bus_seat_id: DbId,
    pub seat_number: String,
    pub price: f64,
    pub passenger_name: String,
    pub passenger_document: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TicketWithPassenger {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub passenger: Passenger,
}
