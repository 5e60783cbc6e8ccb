//! Ticket buyers.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub id: DbId,
    pub full_name: String,
    pub document_id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(min = 1, max = 40))]
    pub document_id: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}
