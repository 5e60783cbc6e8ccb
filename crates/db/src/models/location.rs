//! Terminals and stops that routes run between.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::types::{DbId, Timestamp};

/// A row from the `locations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocation {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
}
