//! Routes and their weekly recurring departure patterns.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use validator::Validate;
use busline_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A row from the `routes` table. `estimated_duration` is in minutes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Route {
    pub id: DbId,
    pub name: String,
    pub origin_id: DbId,
    pub destination_id: DbId,
    pub estimated_duration: i32,
    pub departure_lane: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoute {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub origin_id: DbId,
    pub destination_id: DbId,
    #[validate(range(min = 1, max = 10080))]
    pub estimated_duration: i32,
    #[validate(length(max = 20))]
    pub departure_lane: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoute {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 10080))]
    pub estimated_duration: Option<i32>,
    #[validate(length(max = 20))]
    pub departure_lane: Option<String>,
}

// ---------------------------------------------------------------------------
// Route schedule
// ---------------------------------------------------------------------------

/// A row from the `route_schedules` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RouteSchedule {
    pub id: DbId,
    pub route_id: DbId,
    #[serde(serialize_with = "serialize_hh_mm")]
    pub departure_time: NaiveTime,
    pub operating_days: Vec<String>,
    pub season_start: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn serialize_hh_mm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// Raw input; `departure_time` and `operating_days` are parsed by the handler.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteSchedule {
    pub route_id: DbId,
    pub departure_time: String,
    #[validate(length(min = 1, max = 7))]
    pub operating_days: Vec<String>,
    pub season_start: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteSchedule {
    pub departure_time: Option<String>,
    #[validate(length(min = 1, max = 7))]
    pub operating_days: Option<Vec<String>>,
    pub season_start: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
    pub active: Option<bool>,
}

/// A fully parsed pattern, ready to be written.
#[derive(Debug, Clone)]
pub struct RouteSchedulePattern {
    pub departure_time: NaiveTime,
    /// Lowercase day names, Monday first, no duplicates.
    pub operating_days: Vec<String>,
    pub season_start: Option<NaiveDate>,
    pub season_end: Option<NaiveDate>,
}
