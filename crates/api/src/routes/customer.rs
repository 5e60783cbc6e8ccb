//! Route definitions for `/customers`.

use axum::routing::get;
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// ```text
/// GET    /          list
/// POST   /          create
/// GET    /{id}      get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(customer::list).post(customer::create))
        .route("/{id}", get(customer::get_by_id))
}
