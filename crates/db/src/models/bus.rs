//! Physical buses and their materialized seats.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Bus
// ---------------------------------------------------------------------------

/// A row from the `buses` table.
///
/// `seat_matrix` is the template layout as it was when the bus was created.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bus {
    pub id: DbId,
    pub company_id: DbId,
    pub template_id: DbId,
    pub plate_number: String,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub maintenance_status: String,
    pub is_active: bool,
    pub seat_matrix: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBus {
    pub company_id: DbId,
    pub template_id: DbId,
    #[validate(length(min = 1, max = 32))]
    pub plate_number: String,
    #[validate(length(max = 120))]
    pub model: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBus {
    #[validate(length(min = 1, max = 32))]
    pub plate_number: Option<String>,
    #[validate(length(max = 120))]
    pub model: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,
    pub maintenance_status: Option<String>,
}

// ---------------------------------------------------------------------------
// Bus seat
// ---------------------------------------------------------------------------

/// A row from the `bus_seats` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BusSeat {
    pub id: DbId,
    pub bus_id: DbId,
    pub seat_number: String,
    pub tier_id: DbId,
    pub status: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBusSeat {
    pub status: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BusWithSeats {
    #[serde(flatten)]
    pub bus: Bus,
    pub seats: Vec<BusSeat>,
}
