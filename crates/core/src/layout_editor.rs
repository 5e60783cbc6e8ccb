//! Seat layout editor for bus type templates.
//!
//! Editing is modelled as an explicit state value ([`LayoutEditor`]) and a
//! pure transition function: every [`LayoutAction`] consumes the current
//! editor and yields the next one or a validation error. The API applies an
//! ordered list of actions to a stored template and persists the result.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::seat_matrix::{generate_floor, Floor, FloorMatrix, SeatPosition, SeatTemplateMatrix};

/// What happens when a second floor is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondFloorPolicy {
    /// Copy the first floor's grid, tiers and gaps by position (create flow).
    CloneFirstFloor,
    /// Like `CloneFirstFloor`, but every first-floor seat must already have
    /// a tier (edit flow).
    RequireAssignedTiers,
}

/// The tier currently picked in each floor's tier selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTiers {
    pub first: Option<Uuid>,
    pub second: Option<Uuid>,
}

impl ActiveTiers {
    fn get(&self, floor: Floor) -> Option<Uuid> {
        match floor {
            Floor::First => self.first,
            Floor::Second => self.second,
        }
    }

    fn set(&mut self, floor: Floor, tier_id: Option<Uuid>) {
        match floor {
            Floor::First => self.first = tier_id,
            Floor::Second => self.second = tier_id,
        }
    }
}

/// One user edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutAction {
    /// Regenerate a floor grid. Discards that floor's tier assignments.
    Resize {
        floor: Floor,
        rows: u32,
        seats_per_row: u32,
    },
    EnableSecondFloor,
    /// Drop the second floor entirely.
    DisableSecondFloor,
    /// Pick (or clear) the tier that subsequent `AssignTier` clicks apply.
    SelectTier {
        floor: Floor,
        tier_id: Option<Uuid>,
    },
    AssignTier {
        floor: Floor,
        seat_id: String,
    },
    /// Flip a cell between seat and gap. A cell turned into a gap loses its tier.
    ToggleEmpty {
        floor: Floor,
        seat_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEditor {
    pub matrix: SeatTemplateMatrix,
    pub active_tiers: ActiveTiers,
    pub second_floor_policy: SecondFloorPolicy,
}

impl LayoutEditor {
    pub fn new(matrix: SeatTemplateMatrix, second_floor_policy: SecondFloorPolicy) -> Self {
        Self {
            matrix,
            active_tiers: ActiveTiers::default(),
            second_floor_policy,
        }
    }

    /// Apply a sequence of actions, stopping at the first failure.
    pub fn apply_all(
        self,
        actions: impl IntoIterator<Item = LayoutAction>,
    ) -> Result<Self, CoreError> {
        actions
            .into_iter()
            .try_fold(self, |editor, action| editor.apply(action))
    }

    pub fn apply(mut self, action: LayoutAction) -> Result<Self, CoreError> {
        match action {
            LayoutAction::Resize {
                floor,
                rows,
                seats_per_row,
            } => self.resize(floor, rows, seats_per_row)?,
            LayoutAction::EnableSecondFloor => self.enable_second_floor()?,
            LayoutAction::DisableSecondFloor => {
                self.matrix.second_floor = None;
                self.active_tiers.second = None;
            }
            LayoutAction::SelectTier { floor, tier_id } => {
                self.active_tiers.set(floor, tier_id);
            }
            LayoutAction::AssignTier { floor, seat_id } => {
                let tier_id = self.active_tiers.get(floor).ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Select a tier for the {} floor before assigning seats",
                        floor_label(floor)
                    ))
                })?;
                let seat = self.seat_mut(floor, &seat_id)?;
                if seat.is_empty {
                    return Err(CoreError::Validation(format!(
                        "Seat '{seat_id}' is an empty position and cannot take a tier"
                    )));
                }
                seat.tier_id = tier_id.to_string();
            }
            LayoutAction::ToggleEmpty { floor, seat_id } => {
                let seat = self.seat_mut(floor, &seat_id)?;
                seat.is_empty = !seat.is_empty;
                if seat.is_empty {
                    seat.tier_id.clear();
                }
            }
        }
        Ok(self)
    }

    pub fn into_matrix(self) -> SeatTemplateMatrix {
        self.matrix
    }

    fn resize(&mut self, floor: Floor, rows: u32, seats_per_row: u32) -> Result<(), CoreError> {
        match floor {
            Floor::First => {
                self.matrix.first_floor = generate_floor(Floor::First, rows, seats_per_row, 0)?;
                // Keep second-floor names unique after the first floor's row count changed.
                if let Some(second) = self.matrix.second_floor.as_mut() {
                    second.renumber(rows);
                }
            }
            Floor::Second => {
                if !self.matrix.has_second_floor() {
                    return Err(CoreError::Validation(
                        "The template has no second floor to resize".to_string(),
                    ));
                }
                let offset = self.matrix.first_floor.dimensions.rows;
                self.matrix.second_floor =
                    Some(generate_floor(Floor::Second, rows, seats_per_row, offset)?);
            }
        }
        Ok(())
    }

    fn enable_second_floor(&mut self) -> Result<(), CoreError> {
        if self.matrix.has_second_floor() {
            return Ok(());
        }

        if self.second_floor_policy == SecondFloorPolicy::RequireAssignedTiers {
            let missing = self
                .matrix
                .first_floor
                .non_empty_seats()
                .filter(|s| !s.has_tier())
                .count();
            if missing > 0 {
                return Err(CoreError::invalid(
                    "Assign a tier to every first-floor seat before adding a second floor",
                    serde_json::json!({ "unassigned_seat_count": missing }),
                ));
            }
        }

        self.matrix.second_floor = Some(clone_floor(&self.matrix.first_floor)?);
        Ok(())
    }

    fn seat_mut(
        &mut self,
        floor: Floor,
        seat_id: &str,
    ) -> Result<&mut SeatPosition, CoreError> {
        let grid = self.matrix.floor_mut(floor).ok_or_else(|| {
            CoreError::Validation(format!(
                "The template has no {} floor",
                floor_label(floor)
            ))
        })?;
        grid.seat_mut(seat_id).ok_or_else(|| {
            CoreError::Validation(format!(
                "Seat '{seat_id}' not found on the {} floor",
                floor_label(floor)
            ))
        })
    }
}

/// Build a second floor with the first floor's shape, copying tiers and gaps
/// by `(row, column)`.
fn clone_floor(first: &FloorMatrix) -> Result<FloorMatrix, CoreError> {
    let dims = first.dimensions;
    let cells = first.cells_by_position();
    let mut second = generate_floor(Floor::Second, dims.rows, dims.seats_per_row, dims.rows)?;
    for seat in &mut second.seats {
        match cells.get(&(seat.row, seat.column)) {
            Some((tier_id, is_empty)) => {
                seat.tier_id = (*tier_id).to_string();
                seat.is_empty = *is_empty;
            }
            // Gap on the first floor stays a gap upstairs.
            None => seat.is_empty = true,
        }
    }
    Ok(second)
}

fn floor_label(floor: Floor) -> &'static str {
    match floor {
        Floor::First => "first",
        Floor::Second => "second",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn vip() -> Uuid {
        Uuid::parse_str("6a1c1a44-4b8e-4f3a-8d0b-2b2f3c4d5e6f").unwrap()
    }

    fn editor(policy: SecondFloorPolicy) -> LayoutEditor {
        LayoutEditor::new(SeatTemplateMatrix::single_floor(2, 2).unwrap(), policy)
    }

    fn assign_every_first_floor_seat(editor: LayoutEditor) -> LayoutEditor {
        let ids: Vec<String> = editor
            .matrix
            .first_floor
            .seats
            .iter()
            .map(|s| s.id.clone())
            .collect();
        let mut actions = vec![LayoutAction::SelectTier {
            floor: Floor::First,
            tier_id: Some(vip()),
        }];
        actions.extend(ids.into_iter().map(|seat_id| LayoutAction::AssignTier {
            floor: Floor::First,
            seat_id,
        }));
        editor.apply_all(actions).unwrap()
    }

    #[test]
    fn assign_requires_selected_tier() {
        let err = editor(SecondFloorPolicy::CloneFirstFloor)
            .apply(LayoutAction::AssignTier {
                floor: Floor::First,
                seat_id: "f1-0-0".to_string(),
            })
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn assign_mutates_only_the_target_seat() {
        let editor = editor(SecondFloorPolicy::CloneFirstFloor)
            .apply_all([
                LayoutAction::SelectTier {
                    floor: Floor::First,
                    tier_id: Some(vip()),
                },
                LayoutAction::AssignTier {
                    floor: Floor::First,
                    seat_id: "f1-1-0".to_string(),
                },
            ])
            .unwrap();
        let assigned: Vec<&str> = editor
            .matrix
            .first_floor
            .seats
            .iter()
            .filter(|s| s.has_tier())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(assigned, ["f1-1-0"]);
    }

    #[test]
    fn resizing_under_an_unbounded_first_floor_fails_cleanly() {
        let mut matrix = SeatTemplateMatrix::single_floor(1, 1).unwrap();
        matrix.second_floor = Some(generate_floor(Floor::Second, 1, 1, 1).unwrap());
        matrix.first_floor.dimensions.rows = u32::MAX;

        let err = LayoutEditor::new(matrix, SecondFloorPolicy::CloneFirstFloor)
            .apply(LayoutAction::Resize {
                floor: Floor::Second,
                rows: 1,
                seats_per_row: 1,
            })
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn active_tier_is_scoped_per_floor() {
        let err = assign_every_first_floor_seat(editor(SecondFloorPolicy::CloneFirstFloor))
            .apply(LayoutAction::EnableSecondFloor)
            .unwrap()
            .apply(LayoutAction::AssignTier {
                floor: Floor::Second,
                seat_id: "f2-0-0".to_string(),
            })
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn clone_policy_copies_tiers_by_position() {
        let editor = editor(SecondFloorPolicy::CloneFirstFloor)
            .apply_all([
                LayoutAction::SelectTier {
                    floor: Floor::First,
                    tier_id: Some(vip()),
                },
                LayoutAction::AssignTier {
                    floor: Floor::First,
                    seat_id: "f1-0-1".to_string(),
                },
                LayoutAction::EnableSecondFloor,
            ])
            .unwrap();
        let second = editor.matrix.second_floor.as_ref().unwrap();
        let tiered: Vec<(u32, u32)> = second
            .seats
            .iter()
            .filter(|s| s.has_tier())
            .map(|s| (s.row, s.column))
            .collect();
        assert_eq!(tiered, [(0, 1)]);
        assert_eq!(second.seats[0].name, "3A");
    }

    #[test]
    fn clone_policy_allows_unassigned_first_floor() {
        let editor = editor(SecondFloorPolicy::CloneFirstFloor)
            .apply(LayoutAction::EnableSecondFloor)
            .unwrap();
        assert!(editor.matrix.has_second_floor());
        assert_eq!(editor.matrix.unassigned_seat_count(), 8);
    }

    #[test]
    fn strict_policy_rejects_unassigned_first_floor() {
        let err = editor(SecondFloorPolicy::RequireAssignedTiers)
            .apply(LayoutAction::EnableSecondFloor)
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidInput { ref details, .. } if details["unassigned_seat_count"] == 4
        );
    }

    #[test]
    fn strict_policy_accepts_fully_assigned_first_floor() {
        let editor = assign_every_first_floor_seat(editor(SecondFloorPolicy::RequireAssignedTiers))
            .apply(LayoutAction::EnableSecondFloor)
            .unwrap();
        assert_eq!(editor.matrix.unassigned_seat_count(), 0);
        assert_eq!(editor.matrix.total_capacity(), 8);
    }

    #[test]
    fn enabling_existing_second_floor_is_a_no_op() {
        let first = editor(SecondFloorPolicy::CloneFirstFloor)
            .apply(LayoutAction::EnableSecondFloor)
            .unwrap();
        let again = first.clone().apply(LayoutAction::EnableSecondFloor).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn disabling_drops_the_second_floor() {
        let editor = editor(SecondFloorPolicy::CloneFirstFloor)
            .apply_all([
                LayoutAction::EnableSecondFloor,
                LayoutAction::DisableSecondFloor,
            ])
            .unwrap();
        assert!(!editor.matrix.has_second_floor());
    }

    #[test]
    fn resize_discards_tiers_on_that_floor() {
        let editor = assign_every_first_floor_seat(editor(SecondFloorPolicy::CloneFirstFloor))
            .apply(LayoutAction::Resize {
                floor: Floor::First,
                rows: 3,
                seats_per_row: 4,
            })
            .unwrap();
        assert_eq!(editor.matrix.total_capacity(), 12);
        assert_eq!(editor.matrix.unassigned_seat_count(), 12);
    }

    #[test]
    fn resizing_first_floor_renumbers_second_floor() {
        let editor = assign_every_first_floor_seat(editor(SecondFloorPolicy::CloneFirstFloor))
            .apply_all([
                LayoutAction::EnableSecondFloor,
                LayoutAction::Resize {
                    floor: Floor::First,
                    rows: 5,
                    seats_per_row: 2,
                },
            ])
            .unwrap();
        let second = editor.matrix.second_floor.as_ref().unwrap();
        assert_eq!(second.seats[0].name, "6A");
        assert!(second.seats.iter().all(|s| s.has_tier()));
    }

    #[test]
    fn resize_of_missing_second_floor_fails() {
        let result = editor(SecondFloorPolicy::CloneFirstFloor).apply(LayoutAction::Resize {
            floor: Floor::Second,
            rows: 1,
            seats_per_row: 1,
        });
        assert!(result.is_err());
    }

    #[test]
    fn toggle_empty_clears_tier_and_capacity() {
        let editor = assign_every_first_floor_seat(editor(SecondFloorPolicy::CloneFirstFloor))
            .apply(LayoutAction::ToggleEmpty {
                floor: Floor::First,
                seat_id: "f1-0-0".to_string(),
            })
            .unwrap();
        assert_eq!(editor.matrix.total_capacity(), 3);
        assert!(editor.matrix.first_floor.seats[0].tier_id.is_empty());
    }

    #[test]
    fn assigning_tier_to_empty_position_fails() {
        let result = editor(SecondFloorPolicy::CloneFirstFloor).apply_all([
            LayoutAction::ToggleEmpty {
                floor: Floor::First,
                seat_id: "f1-0-0".to_string(),
            },
            LayoutAction::SelectTier {
                floor: Floor::First,
                tier_id: Some(vip()),
            },
            LayoutAction::AssignTier {
                floor: Floor::First,
                seat_id: "f1-0-0".to_string(),
            },
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: LayoutAction = serde_json::from_value(serde_json::json!({
            "type": "assign_tier",
            "floor": "second",
            "seat_id": "f2-0-1"
        }))
        .unwrap();
        assert_eq!(
            action,
            LayoutAction::AssignTier {
                floor: Floor::Second,
                seat_id: "f2-0-1".to_string()
            }
        );
    }
}
