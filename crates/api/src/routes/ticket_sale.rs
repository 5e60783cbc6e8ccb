//! Route definitions for `/ticket-sales`.

use axum::routing::post;
use axum::Router;

use crate::handlers::ticket_sale;
use crate::state::AppState;

/// ```text
/// POST   /step      step
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/step", post(ticket_sale::step))
}
