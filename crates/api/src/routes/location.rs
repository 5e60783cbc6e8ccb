//! Route definitions for `/locations`.

use axum::routing::get;
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// ```text
/// GET    /      list
/// POST   /      create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(location::list).post(location::create))
}
