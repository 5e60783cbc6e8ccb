//! Route definitions for `/routes`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{route, route_schedule};
use crate::state::AppState;

/// ```text
/// GET    /                        list
/// POST   /                        create
/// GET    /{id}                    get_by_id
/// PUT    /{id}                    update
/// DELETE /{id}                    deactivate
/// GET    /{id}/route-schedules    route_schedule::list_by_route
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(route::list).post(route::create))
        .route(
            "/{id}",
            get(route::get_by_id)
                .put(route::update)
                .delete(route::deactivate),
        )
        .route("/{id}/route-schedules", get(route_schedule::list_by_route))
}
