//! Bus assignment time windows.
//!
//! A bus may hold at most one active assignment over any instant. Windows are
//! closed intervals: two windows that merely touch at an endpoint conflict.

use serde::Serialize;
use serde_json::json;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Message for a window whose end is not after its start.
pub const INVALID_WINDOW: &str = "Horario inválido";

/// Message for a window that collides with an active assignment.
pub const SCHEDULE_CONFLICT: &str = "Conflicto de horario";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    /// Build a window, rejecting `end <= start`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::invalid(
                INVALID_WINDOW,
                json!({ "start_time": start, "end_time": end }),
            ));
        }
        Ok(Self { start, end })
    }

    /// Closed-interval intersection: `self.start <= other.end && self.end >= other.start`.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// The windows in `existing` that `requested` collides with.
pub fn overlapping<'a>(
    requested: &TimeWindow,
    existing: impl IntoIterator<Item = &'a TimeWindow>,
) -> Vec<TimeWindow> {
    existing
        .into_iter()
        .filter(|w| requested.overlaps(w))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 4, hour, 0, 0).unwrap()
    }

    fn window(start: u32, end: u32) -> TimeWindow {
        TimeWindow::new(at(start), at(end)).unwrap()
    }

    #[test]
    fn end_before_start_is_invalid() {
        assert_matches!(
            TimeWindow::new(at(12), at(10)),
            Err(CoreError::InvalidInput { message, .. }) if message == INVALID_WINDOW
        );
    }

    #[test]
    fn zero_length_window_is_invalid() {
        assert!(TimeWindow::new(at(10), at(10)).is_err());
    }

    #[test]
    fn partial_overlap_conflicts() {
        let existing = [window(10, 12)];
        assert_eq!(overlapping(&window(11, 13), &existing).len(), 1);
    }

    #[test]
    fn overlapping_keeps_only_colliding_windows() {
        let existing = [window(8, 9), window(10, 12), window(16, 18)];
        assert_eq!(overlapping(&window(11, 15), &existing), [window(10, 12)]);
    }

    #[test]
    fn touching_start_boundary_conflicts() {
        let existing = [window(10, 12)];
        assert_eq!(overlapping(&window(9, 10), &existing).len(), 1);
    }

    #[test]
    fn touching_end_boundary_conflicts() {
        let existing = [window(10, 12)];
        assert_eq!(overlapping(&window(12, 13), &existing).len(), 1);
    }

    #[test]
    fn containing_window_conflicts() {
        let existing = [window(10, 12)];
        assert_eq!(overlapping(&window(8, 14), &existing).len(), 1);
    }

    #[test]
    fn disjoint_windows_pass() {
        let existing = [window(10, 12), window(16, 18)];
        assert!(overlapping(&window(13, 15), &existing).is_empty());
    }

    #[test]
    fn no_existing_windows_pass() {
        assert!(overlapping(&window(1, 2), &[]).is_empty());
    }
}
