//! Route definitions for `/bus-assignments`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::bus_assignment;
use crate::state::AppState;

/// ```text
/// GET    /                 list
/// POST   /                 create
/// GET    /{id}             get_by_id
/// PATCH  /{id}/status      update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bus_assignment::list).post(bus_assignment::create))
        .route("/{id}", get(bus_assignment::get_by_id))
        .route("/{id}/status", patch(bus_assignment::update_status))
}
