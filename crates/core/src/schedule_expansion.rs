//! Recurring schedule expansion.
//!
//! A route schedule is a weekly pattern (operating days + wall-clock
//! departure time). Expanding it over a date window yields one concrete trip
//! per calendar day whose weekday is in the pattern. Wall-clock times are
//! interpreted as UTC.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default cap on the number of days a single expansion request may cover.
pub const DEFAULT_MAX_EXPANSION_DAYS: i64 = 366;

// ---------------------------------------------------------------------------
// Operating days
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl OperatingDay {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Parse a day name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            _ => Err(CoreError::Validation(format!(
                "Invalid operating day '{value}'. Must be one of: monday, tuesday, \
                 wednesday, thursday, friday, saturday, sunday"
            ))),
        }
    }
}

/// Parse, de-duplicate and sort (Monday first) a list of day names.
pub fn normalize_operating_days<S: AsRef<str>>(
    days: &[S],
) -> Result<Vec<OperatingDay>, CoreError> {
    if days.is_empty() {
        return Err(CoreError::Validation(
            "operating_days must contain at least one day".to_string(),
        ));
    }
    let mut parsed = days
        .iter()
        .map(|d| OperatingDay::parse(d.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    parsed.sort();
    parsed.dedup();
    Ok(parsed)
}

/// Parse an `HH:MM` departure time. `HH:MM:SS` is accepted; seconds are zeroed.
pub fn parse_departure_time(value: &str) -> Result<NaiveTime, CoreError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|t| t.with_second(0).unwrap_or(t))
        .map_err(|_| {
            CoreError::Validation(format!(
                "Invalid departure_time '{value}'. Expected HH:MM"
            ))
        })
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// The parts of a route schedule and its route that drive expansion.
#[derive(Debug, Clone)]
pub struct RecurringPattern {
    pub departure_time: NaiveTime,
    pub operating_days: Vec<OperatingDay>,
    /// Route duration in minutes.
    pub estimated_duration_minutes: i32,
}

/// One concrete dated trip produced by expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripInstance {
    pub service_date: NaiveDate,
    pub departure: Timestamp,
    pub estimated_arrival: Timestamp,
}

/// Validate the caller's date window.
pub fn validate_window(start: NaiveDate, end: NaiveDate, max_days: i64) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(format!(
            "end_date ({end}) must not be before start_date ({start})"
        )));
    }
    let days = (end - start).num_days() + 1;
    if days > max_days {
        return Err(CoreError::Validation(format!(
            "Date range covers {days} days; at most {max_days} may be generated at once"
        )));
    }
    Ok(())
}

/// Enumerate every operating day in `[start, end]` (inclusive) as a trip.
///
/// Arrival is departure plus the route duration in calendar minutes, so
/// late departures roll over into the next day.
pub fn expand(pattern: &RecurringPattern, start: NaiveDate, end: NaiveDate) -> Vec<TripInstance> {
    let duration = Duration::minutes(i64::from(pattern.estimated_duration_minutes));
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| {
            pattern
                .operating_days
                .contains(&OperatingDay::from_weekday(day.weekday()))
        })
        .map(|day| {
            let departure = Utc.from_utc_datetime(&day.and_time(pattern.departure_time));
            TripInstance {
                service_date: day,
                departure,
                estimated_arrival: departure + duration,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
