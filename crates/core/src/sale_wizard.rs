//! Ticket sale wizard.
//!
//! The multi-step counter sale is an explicit value: the current [`SaleStep`]
//! plus the [`SaleSelections`] gathered so far. [`SaleWizard::apply`] is a
//! pure `(state, action) -> state` function, so the server can drive the
//! wizard statelessly and the client only stores the returned value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Maximum number of seats sold in one transaction.
pub const MAX_SEATS_PER_SALE: usize = 20;

/// Maximum passenger name length.
pub const MAX_PASSENGER_NAME_LEN: usize = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStep {
    #[default]
    SelectSchedule,
    SelectSeats,
    PassengerDetails,
    Review,
    Confirmed,
}

impl SaleStep {
    pub fn label(self) -> &'static str {
        match self {
            Self::SelectSchedule => "Select Schedule",
            Self::SelectSeats => "Select Seats",
            Self::PassengerDetails => "Passenger Details",
            Self::Review => "Review",
            Self::Confirmed => "Confirmed",
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            Self::SelectSchedule | Self::Confirmed => None,
            Self::SelectSeats => Some(Self::SelectSchedule),
            Self::PassengerDetails => Some(Self::SelectSeats),
            Self::Review => Some(Self::PassengerDetails),
        }
    }
}

/// Passenger travelling on one selected seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerSelection {
    pub bus_seat_id: Uuid,
    pub passenger_name: String,
    #[serde(default)]
    pub passenger_document: Option<String>,
    /// Overrides the schedule price when set.
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleSelections {
    pub schedule_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub seat_ids: Vec<Uuid>,
    #[serde(default)]
    pub passengers: Vec<PassengerSelection>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleWizard {
    pub step: SaleStep,
    #[serde(default)]
    pub selections: SaleSelections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SaleAction {
    ChooseSchedule {
        schedule_id: Uuid,
        customer_id: Uuid,
    },
    ToggleSeat {
        bus_seat_id: Uuid,
    },
    ConfirmSeats,
    SetPassengers {
        passengers: Vec<PassengerSelection>,
        #[serde(default)]
        notes: Option<String>,
    },
    Confirm,
    Back,
    Reset,
}

impl SaleAction {
    fn name(&self) -> &'static str {
        match self {
            Self::ChooseSchedule { .. } => "choose_schedule",
            Self::ToggleSeat { .. } => "toggle_seat",
            Self::ConfirmSeats => "confirm_seats",
            Self::SetPassengers { .. } => "set_passengers",
            Self::Confirm => "confirm",
            Self::Back => "back",
            Self::Reset => "reset",
        }
    }
}

/// Everything needed to create the tickets of a reviewed sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkout {
    pub schedule_id: Uuid,
    pub customer_id: Uuid,
    pub notes: Option<String>,
    pub seats: Vec<PassengerSelection>,
}

impl SaleWizard {
    pub fn apply(self, action: SaleAction) -> Result<Self, CoreError> {
        let Self {
            step,
            mut selections,
        } = self;

        let next = match (step, action) {
            (_, SaleAction::Reset) => return Ok(Self::default()),

            (SaleStep::SelectSchedule | SaleStep::SelectSeats, SaleAction::ChooseSchedule {
                schedule_id,
                customer_id,
            }) => {
                if selections.schedule_id != Some(schedule_id) {
                    selections.seat_ids.clear();
                    selections.passengers.clear();
                }
                selections.schedule_id = Some(schedule_id);
                selections.customer_id = Some(customer_id);
                SaleStep::SelectSeats
            }

            (SaleStep::SelectSeats, SaleAction::ToggleSeat { bus_seat_id }) => {
                if let Some(pos) = selections.seat_ids.iter().position(|s| *s == bus_seat_id) {
                    selections.seat_ids.remove(pos);
                } else {
                    if selections.seat_ids.len() >= MAX_SEATS_PER_SALE {
                        return Err(CoreError::Validation(format!(
                            "At most {MAX_SEATS_PER_SALE} seats can be sold at once"
                        )));
                    }
                    selections.seat_ids.push(bus_seat_id);
                }
                SaleStep::SelectSeats
            }

            (SaleStep::SelectSeats, SaleAction::ConfirmSeats) => {
                if selections.seat_ids.is_empty() {
                    return Err(CoreError::Validation(
                        "Select at least one seat".to_string(),
                    ));
                }
                selections
                    .passengers
                    .retain(|p| selections.seat_ids.contains(&p.bus_seat_id));
                SaleStep::PassengerDetails
            }

            (SaleStep::PassengerDetails, SaleAction::SetPassengers { passengers, notes }) => {
                validate_passengers(&selections.seat_ids, &passengers)?;
                selections.passengers = passengers;
                selections.notes = notes;
                SaleStep::Review
            }

            (SaleStep::Review, SaleAction::Confirm) => SaleStep::Confirmed,

            (current, SaleAction::Back) => current.previous().ok_or_else(|| {
                CoreError::Validation(format!("Cannot go back from step '{}'", current.label()))
            })?,

            (current, action) => {
                return Err(CoreError::Validation(format!(
                    "Action '{}' is not allowed at step '{}'",
                    action.name(),
                    current.label()
                )))
            }
        };

        Ok(Self {
            step: next,
            selections,
        })
    }

    /// The reviewed sale, ready to be turned into tickets.
    pub fn checkout(&self) -> Result<Checkout, CoreError> {
        if !matches!(self.step, SaleStep::Review | SaleStep::Confirmed) {
            return Err(CoreError::Validation(format!(
                "Sale is not ready for checkout (step '{}')",
                self.step.label()
            )));
        }
        let (Some(schedule_id), Some(customer_id)) =
            (self.selections.schedule_id, self.selections.customer_id)
        else {
            return Err(CoreError::Validation(
                "Sale is missing its schedule or customer".to_string(),
            ));
        };
        Ok(Checkout {
            schedule_id,
            customer_id,
            notes: self.selections.notes.clone(),
            seats: self.selections.passengers.clone(),
        })
    }
}

/// Passengers must cover exactly the selected seats, once each, with a name.
pub fn validate_passengers(
    seat_ids: &[Uuid],
    passengers: &[PassengerSelection],
) -> Result<(), CoreError> {
    if passengers.len() != seat_ids.len() {
        return Err(CoreError::Validation(format!(
            "Expected {} passengers, got {}",
            seat_ids.len(),
            passengers.len()
        )));
    }
    let mut seen = Vec::with_capacity(passengers.len());
    for p in passengers {
        if !seat_ids.contains(&p.bus_seat_id) {
            return Err(CoreError::Validation(format!(
                "Seat {} was not selected",
                p.bus_seat_id
            )));
        }
        if seen.contains(&p.bus_seat_id) {
            return Err(CoreError::Validation(format!(
                "Seat {} has more than one passenger",
                p.bus_seat_id
            )));
        }
        seen.push(p.bus_seat_id);

        let name = p.passenger_name.trim();
        if name.is_empty() || name.len() > MAX_PASSENGER_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "passenger_name for seat {} must be 1-{MAX_PASSENGER_NAME_LEN} characters",
                p.bus_seat_id
            )));
        }
        if let Some(price) = p.price {
            if !price.is_finite() || price < 0.0 {
                return Err(CoreError::Validation(format!(
                    "price for seat {} must be a non-negative number",
                    p.bus_seat_id
                )));
            }
        }
    }
    Ok(())
}
