//! Bindings of a bus to a schedule for a time window.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use busline_core::types::{DbId, Timestamp};

/// A row from the `bus_assignments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BusAssignment {
    pub id: DbId,
    pub bus_id: DbId,
    pub route_id: DbId,
    pub schedule_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: String,
    pub assigned_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateBusAssignment {
    pub bus_id: DbId,
    pub route_id: DbId,
    pub schedule_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentStatus {
    pub status: String,
}
