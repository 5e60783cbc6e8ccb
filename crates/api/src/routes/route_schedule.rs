//! Route definitions for `/route-schedules`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::route_schedule;
use crate::state::AppState;

/// ```text
/// POST   /          create
/// GET    /{id}      get_by_id
/// PUT    /{id}      update
/// DELETE /{id}      delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(route_schedule::create))
        .route(
            "/{id}",
            get(route_schedule::get_by_id)
                .put(route_schedule::update)
                .delete(route_schedule::delete),
        )
}
