//! Text status vocabularies and their state machines.
//!
//! Statuses are stored as lowercase TEXT columns guarded by CHECK
//! constraints; these enums are the single Rust source of truth for the
//! allowed values and transitions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_status {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Database / wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Parse a status string from the database or a request body.
            pub fn from_str_db(value: &str) -> Result<Self, CoreError> {
                match value {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err(CoreError::Validation(format!(
                        "Invalid {} '{value}'. Must be one of: {}",
                        $label,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_status! {
    /// Physical condition of a bus.
    MaintenanceStatus ("maintenance status") {
        Active = "active",
        InMaintenance = "in_maintenance",
        Retired = "retired",
    }
}

define_text_status! {
    /// Sellability of an individual bus seat.
    SeatStatus ("seat status") {
        Available = "available",
        Maintenance = "maintenance",
        Disabled = "disabled",
    }
}

define_text_status! {
    /// Lifecycle of a dated trip.
    ScheduleStatus ("schedule status") {
        Scheduled = "scheduled",
        InProgress = "in_progress",
        Completed = "completed",
        Cancelled = "cancelled",
        Delayed = "delayed",
    }
}

define_text_status! {
    AssignmentStatus ("assignment status") {
        Active = "active",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_text_status! {
    TicketStatus ("ticket status") {
        Active = "active",
        Cancelled = "cancelled",
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

impl ScheduleStatus {
    pub fn valid_transitions(self) -> &'static [ScheduleStatus] {
        use ScheduleStatus::*;
        match self {
            Scheduled => &[InProgress, Delayed, Cancelled],
            Delayed => &[InProgress, Cancelled],
            InProgress => &[Completed],
            Completed | Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }

    /// Tickets can only be sold before departure.
    pub fn accepts_sales(self) -> bool {
        matches!(self, Self::Scheduled | Self::Delayed)
    }
}

impl AssignmentStatus {
    pub fn valid_transitions(self) -> &'static [AssignmentStatus] {
        match self {
            Self::Active => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }
}

impl TicketStatus {
    pub fn valid_transitions(self) -> &'static [TicketStatus] {
        match self {
            Self::Active => &[Self::Cancelled],
            Self::Cancelled => &[],
        }
    }
}

/// Validate a transition given the source state's allowed targets.
pub fn validate_transition<S>(from: S, to: S, allowed: &[S]) -> Result<(), CoreError>
where
    S: Copy + PartialEq + std::fmt::Display,
{
    if allowed.contains(&to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid transition: {from} -> {to}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- parsing ------------------------------------------------------------

    #[test]
    fn round_trips_database_strings() {
        assert_eq!(
            ScheduleStatus::from_str_db("in_progress").unwrap(),
            ScheduleStatus::InProgress
        );
        assert_eq!(MaintenanceStatus::InMaintenance.as_str(), "in_maintenance");
    }

    #[test]
    fn unknown_status_lists_allowed_values() {
        let err = SeatStatus::from_str_db("broken").unwrap_err().to_string();
        assert!(err.contains("available, maintenance, disabled"));
    }

    #[test]
    fn serde_uses_database_strings() {
        let json = serde_json::to_value(ScheduleStatus::InProgress).unwrap();
        assert_eq!(json, "in_progress");
        let parsed: AssignmentStatus = serde_json::from_value("cancelled".into()).unwrap();
        assert_eq!(parsed, AssignmentStatus::Cancelled);
    }

    // -- schedule transitions -----------------------------------------------

    #[test]
    fn scheduled_can_start_delay_or_cancel() {
        let from = ScheduleStatus::Scheduled;
        for to in [
            ScheduleStatus::InProgress,
            ScheduleStatus::Delayed,
            ScheduleStatus::Cancelled,
        ] {
            assert!(validate_transition(from, to, from.valid_transitions()).is_ok());
        }
    }

    #[test]
    fn scheduled_cannot_complete_directly() {
        let from = ScheduleStatus::Scheduled;
        assert!(
            validate_transition(from, ScheduleStatus::Completed, from.valid_transitions())
                .is_err()
        );
    }

    #[test]
    fn terminal_schedule_states() {
        assert!(ScheduleStatus::Completed.is_terminal());
        assert!(ScheduleStatus::Cancelled.is_terminal());
        assert!(!ScheduleStatus::Delayed.is_terminal());
    }

    #[test]
    fn only_pre_departure_schedules_accept_sales() {
        assert!(ScheduleStatus::Scheduled.accepts_sales());
        assert!(ScheduleStatus::Delayed.accepts_sales());
        assert!(!ScheduleStatus::InProgress.accepts_sales());
        assert!(!ScheduleStatus::Cancelled.accepts_sales());
    }

    // -- assignment / ticket transitions ------------------------------------

    #[test]
    fn active_assignment_can_finish_or_cancel() {
        let from = AssignmentStatus::Active;
        assert!(validate_transition(from, AssignmentStatus::Completed, from.valid_transitions()).is_ok());
        assert!(validate_transition(from, AssignmentStatus::Cancelled, from.valid_transitions()).is_ok());
    }

    #[test]
    fn cancelled_assignment_is_terminal() {
        let from = AssignmentStatus::Cancelled;
        let err = validate_transition(from, AssignmentStatus::Active, from.valid_transitions())
            .unwrap_err()
            .to_string();
        assert!(err.contains("cancelled -> active"));
    }

    #[test]
    fn cancelled_ticket_cannot_be_cancelled_again() {
        let from = TicketStatus::Cancelled;
        assert!(validate_transition(from, TicketStatus::Cancelled, from.valid_transitions()).is_err());
    }
}
