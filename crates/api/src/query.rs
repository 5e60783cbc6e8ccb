//! Shared query parameter types for API handlers.

use serde::Deserialize;
use busline_core::types::DbId;

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?company_id=&include_inactive=` for fleet listings.
#[derive(Debug, Deserialize)]
pub struct CompanyFilterParams {
    pub company_id: Option<DbId>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?bus_id=` for assignment listings.
#[derive(Debug, Deserialize)]
pub struct BusFilterParams {
    pub bus_id: Option<DbId>,
}
