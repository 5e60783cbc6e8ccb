//! Route definitions for `/bus-templates`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bus_template;
use crate::state::AppState;

/// ```text
/// POST   /                create
/// GET    /{id}            get_by_id
/// PUT    /{id}            update
/// DELETE /{id}            delete
/// POST   /{id}/layout     apply_layout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bus_template::create))
        .route(
            "/{id}",
            get(bus_template::get_by_id)
                .put(bus_template::update)
                .delete(bus_template::delete),
        )
        .route("/{id}/layout", post(bus_template::apply_layout))
}
