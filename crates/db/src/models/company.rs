//! Companies and the records that hang off them: branch offices and staff
//! profiles.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use busline_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Company
// ---------------------------------------------------------------------------

/// A row from the `companies` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Company {
    pub id: DbId,
    pub name: String,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompany {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 32))]
    pub tax_id: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Partial update of company details. Deactivation goes through the guarded
/// delete instead.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompany {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 32))]
    pub tax_id: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// A branch office row from the `branches` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Branch {
    pub id: DbId,
    pub company_id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBranch {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// A staff profile row from the `profiles` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub company_id: DbId,
    pub full_name: String,
    pub role: String,
    pub email: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a profile. `role` defaults to `staff` and must be one
/// of `admin`, `manager`, `staff`, `driver` (enforced by a CHECK constraint).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfile {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub role: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}
