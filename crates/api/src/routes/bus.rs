//! Route definitions for `/buses`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::bus;
use crate::state::AppState;

/// ```text
/// GET    /                        list
/// POST   /                        create
/// GET    /{id}                    get_by_id
/// PUT    /{id}                    update
/// DELETE /{id}                    delete
/// PATCH  /{id}/seats/{seat_id}    update_seat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bus::list).post(bus::create))
        .route(
            "/{id}",
            get(bus::get_by_id).put(bus::update).delete(bus::delete),
        )
        .route("/{id}/seats/{seat_id}", patch(bus::update_seat))
}
