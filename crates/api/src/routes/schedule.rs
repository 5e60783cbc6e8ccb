//! Route definitions for `/schedules`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// ```text
/// GET    /                     list
/// POST   /                     generate
/// GET    /{id}                 get_by_id
/// PATCH  /{id}/status          update_status
/// GET    /{id}/tickets         list_tickets
/// GET    /{id}/passengers      list_passengers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedule::list).post(schedule::generate))
        .route("/{id}", get(schedule::get_by_id))
        .route("/{id}/status", patch(schedule::update_status))
        .route("/{id}/tickets", get(schedule::list_tickets))
        .route("/{id}/passengers", get(schedule::list_passengers))
}
