//! Route definitions for `/tickets`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::ticket;
use crate::state::AppState;

/// ```text
/// POST   /                 create
/// GET    /{id}             get_by_id
/// PATCH  /{id}/cancel      cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(ticket::create))
        .route("/{id}", get(ticket::get_by_id))
        .route("/{id}/cancel", patch(ticket::cancel))
}
