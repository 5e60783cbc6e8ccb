//! Route definitions for `/seat-tiers`.
//!
//! Listing is company-scoped and lives under `/companies/{id}/seat-tiers`.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::seat_tier;
use crate::state::AppState;

/// ```text
/// POST   /          create
/// PUT    /{id}      update
/// DELETE /{id}      delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(seat_tier::create))
        .route("/{id}", put(seat_tier::update).delete(seat_tier::delete))
}
