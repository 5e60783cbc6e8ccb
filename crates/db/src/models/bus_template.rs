//! Bus type templates: a named seat layout reused across physical buses.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::layout_editor::LayoutAction;
use busline_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `bus_templates` table.
///
/// `seat_template_matrix` holds the layout document; parse it with
/// `SeatTemplateMatrix::from_json` before use.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BusTemplate {
    pub id: DbId,
    pub company_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub total_capacity: i32,
    pub seat_template_matrix: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Grid size for one generated floor.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub seats_per_row: u32,
}

/// Input for creating a template.
///
/// Either send a complete `seat_template_matrix`, or grid sizes for the
/// floors to generate. A generated second floor starts as a copy of the
/// first floor's tiers.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBusTemplate {
    pub company_id: DbId,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub first_floor: Option<GridSize>,
    pub second_floor: Option<GridSize>,
    pub seat_template_matrix: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Update DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBusTemplate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub seat_template_matrix: Option<serde_json::Value>,
}

/// Ordered editor actions applied to the stored layout.
#[derive(Debug, Deserialize)]
pub struct ApplyLayoutActions {
    pub actions: Vec<LayoutAction>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A template together with how many real seats still lack a price tier.
#[derive(Debug, Serialize)]
pub struct BusTemplateWithStats {
    #[serde(flatten)]
    pub template: BusTemplate,
    pub unassigned_seat_count: usize,
}
