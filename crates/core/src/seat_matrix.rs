//! Bus seat layout model.
//!
//! A bus type template owns a [`SeatTemplateMatrix`]: one or two rectangular
//! floor grids whose cells are [`SeatPosition`]s. Cells flagged `isEmpty` are
//! aisles or gaps and never become real seats. The matrix is persisted as a
//! JSON document, so the serialized field names are part of the storage
//! format and stay camelCase.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Column letters run `A..Z`, so a row holds at most 26 seats.
pub const MAX_SEATS_PER_ROW: u32 = 26;

/// Upper bound on rows per floor.
pub const MAX_ROWS_PER_FLOOR: u32 = 40;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which deck of the bus a floor grid describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Floor {
    First,
    Second,
}

impl Floor {
    /// 1-based floor number, used in generated seat ids.
    pub fn number(self) -> u32 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// One cell of a floor grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPosition {
    /// Stable identity across template edits.
    pub id: String,
    /// Display label such as `4C`.
    pub name: String,
    /// Price tier reference. Empty string means unassigned.
    #[serde(default)]
    pub tier_id: String,
    pub row: u32,
    pub column: u32,
    #[serde(default)]
    pub is_empty: bool,
}

impl SeatPosition {
    /// The tier as a UUID, or `None` when unassigned or malformed.
    pub fn tier_uuid(&self) -> Option<Uuid> {
        if self.tier_id.is_empty() {
            return None;
        }
        Uuid::parse_str(&self.tier_id).ok()
    }

    pub fn has_tier(&self) -> bool {
        !self.tier_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub rows: u32,
    pub seats_per_row: u32,
}

/// A rectangular grid of seat positions. Absent cells are gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorMatrix {
    pub dimensions: Dimensions,
    pub seats: Vec<SeatPosition>,
}

/// The full seat layout of a bus type template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatTemplateMatrix {
    pub first_floor: FloorMatrix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_floor: Option<FloorMatrix>,
}

/// A seat ready to be inserted as a per-bus seat row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedSeat {
    pub seat_number: String,
    pub tier_id: Uuid,
}

// ---------------------------------------------------------------------------
// Grid generation
// ---------------------------------------------------------------------------

/// Column letter for a 0-based column index (`0 -> 'A'`). Columns past
/// `Z` are rejected by [`validate_dimensions`] before names are generated.
pub fn column_letter(column: u32) -> char {
    char::from(b'A' + (column % MAX_SEATS_PER_ROW) as u8)
}

/// Display label for a seat: 1-based row number followed by the column letter.
pub fn seat_name(row_number: u32, column: u32) -> String {
    format!("{row_number}{}", column_letter(column))
}

/// Validate grid dimensions requested by the caller.
pub fn validate_dimensions(rows: u32, seats_per_row: u32) -> Result<(), CoreError> {
    if rows == 0 || rows > MAX_ROWS_PER_FLOOR {
        return Err(CoreError::Validation(format!(
            "rows must be between 1 and {MAX_ROWS_PER_FLOOR}, got {rows}"
        )));
    }
    if seats_per_row == 0 || seats_per_row > MAX_SEATS_PER_ROW {
        return Err(CoreError::Validation(format!(
            "seats_per_row must be between 1 and {MAX_SEATS_PER_ROW}, got {seats_per_row}"
        )));
    }
    Ok(())
}

/// Generate a fully populated floor grid with no tiers assigned.
///
/// `row_offset` shifts the displayed row numbers so that seat names stay
/// unique across floors (the second floor continues after the first).
pub fn generate_floor(
    floor: Floor,
    rows: u32,
    seats_per_row: u32,
    row_offset: u32,
) -> Result<FloorMatrix, CoreError> {
    validate_dimensions(rows, seats_per_row)?;
    if row_offset > MAX_ROWS_PER_FLOOR {
        return Err(CoreError::Validation(format!(
            "row offset must be at most {MAX_ROWS_PER_FLOOR}, got {row_offset}"
        )));
    }

    let mut seats = Vec::with_capacity((rows * seats_per_row) as usize);
    for row in 0..rows {
        for column in 0..seats_per_row {
            seats.push(SeatPosition {
                id: format!("f{}-{row}-{column}", floor.number()),
                name: seat_name(row_offset + row + 1, column),
                tier_id: String::new(),
                row,
                column,
                is_empty: false,
            });
        }
    }

    Ok(FloorMatrix {
        dimensions: Dimensions {
            rows,
            seats_per_row,
        },
        seats,
    })
}

// ---------------------------------------------------------------------------
// Floor helpers
// ---------------------------------------------------------------------------

impl FloorMatrix {
    pub fn non_empty_seats(&self) -> impl Iterator<Item = &SeatPosition> {
        self.seats.iter().filter(|s| !s.is_empty)
    }

    /// Number of real (non-empty) seats on this floor.
    pub fn capacity(&self) -> usize {
        self.non_empty_seats().count()
    }

    pub fn seat_mut(&mut self, seat_id: &str) -> Option<&mut SeatPosition> {
        self.seats.iter_mut().find(|s| s.id == seat_id)
    }

    /// Recompute display names after a row offset change. Tiers are kept.
    ///
    /// The offset is the first floor's row count, already bounded by
    /// [`validate_dimensions`].
    pub fn renumber(&mut self, row_offset: u32) {
        for seat in &mut self.seats {
            let row_number = row_offset.saturating_add(seat.row).saturating_add(1);
            seat.name = seat_name(row_number, seat.column);
        }
    }

    /// Tier and emptiness of every cell keyed by grid position.
    pub fn cells_by_position(&self) -> BTreeMap<(u32, u32), (&str, bool)> {
        self.seats
            .iter()
            .map(|s| ((s.row, s.column), (s.tier_id.as_str(), s.is_empty)))
            .collect()
    }

    fn validate(&self, floor: Floor) -> Result<(), String> {
        let Dimensions {
            rows,
            seats_per_row,
        } = self.dimensions;
        validate_dimensions(rows, seats_per_row).map_err(|e| format!("{floor:?} floor: {e}"))?;

        let mut ids = HashSet::with_capacity(self.seats.len());
        let mut positions = HashSet::with_capacity(self.seats.len());
        for seat in &self.seats {
            if seat.row >= rows || seat.column >= seats_per_row {
                return Err(format!(
                    "Seat '{}' at ({}, {}) lies outside the {rows}x{seats_per_row} grid",
                    seat.id, seat.row, seat.column
                ));
            }
            if !ids.insert(seat.id.as_str()) {
                return Err(format!("Duplicate seat id '{}'", seat.id));
            }
            if !positions.insert((seat.row, seat.column)) {
                return Err(format!(
                    "Two seats occupy position ({}, {})",
                    seat.row, seat.column
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Template matrix
// ---------------------------------------------------------------------------

impl SeatTemplateMatrix {
    /// A single-floor template with an unassigned grid.
    pub fn single_floor(rows: u32, seats_per_row: u32) -> Result<Self, CoreError> {
        Ok(Self {
            first_floor: generate_floor(Floor::First, rows, seats_per_row, 0)?,
            second_floor: None,
        })
    }

    /// Parse a stored or submitted JSON document.
    ///
    /// Any shape mismatch (including a first floor without `seats`) is an
    /// "Invalid template structure" validation error.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CoreError> {
        let matrix: Self = serde_json::from_value(value.clone()).map_err(|e| {
            CoreError::invalid(
                "Invalid template structure",
                serde_json::json!({ "reason": e.to_string() }),
            )
        })?;
        matrix.validate_structure()?;
        Ok(matrix)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Check grid bounds and id/position uniqueness on every floor.
    pub fn validate_structure(&self) -> Result<(), CoreError> {
        self.first_floor
            .validate(Floor::First)
            .and_then(|()| match &self.second_floor {
                Some(second) => second.validate(Floor::Second),
                None => Ok(()),
            })
            .map_err(|reason| {
                CoreError::invalid(
                    "Invalid template structure",
                    serde_json::json!({ "reason": reason }),
                )
            })
    }

    pub fn floor(&self, floor: Floor) -> Option<&FloorMatrix> {
        match floor {
            Floor::First => Some(&self.first_floor),
            Floor::Second => self.second_floor.as_ref(),
        }
    }

    pub fn floor_mut(&mut self, floor: Floor) -> Option<&mut FloorMatrix> {
        match floor {
            Floor::First => Some(&mut self.first_floor),
            Floor::Second => self.second_floor.as_mut(),
        }
    }

    pub fn has_second_floor(&self) -> bool {
        self.second_floor.is_some()
    }

    /// All non-empty seats, first floor before second.
    pub fn non_empty_seats(&self) -> impl Iterator<Item = &SeatPosition> {
        self.first_floor
            .non_empty_seats()
            .chain(self.second_floor.iter().flat_map(|f| f.non_empty_seats()))
    }

    /// Count of non-empty seats across both floors.
    pub fn total_capacity(&self) -> i32 {
        self.non_empty_seats().count() as i32
    }

    /// Non-empty seats still waiting for a tier.
    pub fn unassigned_seat_count(&self) -> usize {
        self.non_empty_seats().filter(|s| !s.has_tier()).count()
    }

    /// Distinct well-formed tier ids referenced by non-empty seats.
    pub fn tier_ids(&self) -> BTreeSet<Uuid> {
        self.non_empty_seats().filter_map(|s| s.tier_uuid()).collect()
    }

    /// Turn the layout into per-bus seat rows.
    ///
    /// Every non-empty seat must carry a well-formed tier id, and seat names
    /// must be unique because they become the bus's seat numbers.
    pub fn materialize(&self) -> Result<Vec<MaterializedSeat>, CoreError> {
        let mut invalid = Vec::new();
        let mut seats = Vec::new();
        for seat in self.non_empty_seats() {
            match seat.tier_uuid() {
                Some(tier_id) => seats.push(MaterializedSeat {
                    seat_number: seat.name.clone(),
                    tier_id,
                }),
                None => invalid.push(seat.name.clone()),
            }
        }

        if !invalid.is_empty() {
            return Err(CoreError::invalid(
                "Invalid seat tier IDs",
                serde_json::json!({
                    "invalid_seat_count": invalid.len(),
                    "seats": invalid,
                }),
            ));
        }

        let mut seen = HashSet::with_capacity(seats.len());
        let duplicates: BTreeSet<&str> = seats
            .iter()
            .filter(|s| !seen.insert(s.seat_number.as_str()))
            .map(|s| s.seat_number.as_str())
            .collect();
        if !duplicates.is_empty() {
            return Err(CoreError::invalid(
                "Duplicate seat names",
                serde_json::json!({ "seats": duplicates }),
            ));
        }

        Ok(seats)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
