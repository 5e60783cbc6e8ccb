//! Dated trips expanded from route schedules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::types::{DbId, Timestamp};

/// A row from the `schedules` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Schedule {
    pub id: DbId,
    pub route_id: DbId,
    pub route_schedule_id: DbId,
    pub bus_id: Option<DbId>,
    pub departure_date: Timestamp,
    pub estimated_arrival_time: Timestamp,
    pub price: f64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request to expand a route schedule over `[start_date, end_date]`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateSchedules {
    pub route_id: DbId,
    pub route_schedule_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// One trip to insert.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub route_id: DbId,
    pub route_schedule_id: DbId,
    pub departure_date: Timestamp,
    pub estimated_arrival_time: Timestamp,
    pub price: f64,
}

/// Optional filters for listing schedules; the time bounds apply to
/// `departure_date` and are inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleFilter {
    pub route_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScheduleStatus {
    pub status: String,
}
