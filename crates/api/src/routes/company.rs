//! Route definitions for `/companies`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{bus_template, company, seat_tier};
use crate::state::AppState;

/// ```text
/// GET    /                          list
/// POST   /                          create
/// GET    /{id}                      get_by_id
/// PUT    /{id}                      update
/// DELETE /{id}                      deactivate
/// GET    /{id}/branches             list_branches
/// POST   /{id}/branches             create_branch
/// GET    /{id}/profiles             list_profiles
/// POST   /{id}/profiles             create_profile
/// GET    /{id}/seat-tiers           seat_tier::list_by_company
/// GET    /{id}/bus-templates        bus_template::list_by_company
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(company::list).post(company::create))
        .route(
            "/{id}",
            get(company::get_by_id)
                .put(company::update)
                .delete(company::deactivate),
        )
        .route(
            "/{id}/branches",
            get(company::list_branches).post(company::create_branch),
        )
        .route(
            "/{id}/profiles",
            get(company::list_profiles).post(company::create_profile),
        )
        .route("/{id}/seat-tiers", get(seat_tier::list_by_company))
        .route("/{id}/bus-templates", get(bus_template::list_by_company))
}
