//! Company-scoped seat price categories.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::types::{DbId, Timestamp};

/// A row from the `seat_tiers` table. `base_price` is read as `float8`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SeatTier {
    pub id: DbId,
    pub company_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSeatTier {
    pub company_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSeatTier {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub base_price: Option<f64>,
    pub is_active: Option<bool>,
}
