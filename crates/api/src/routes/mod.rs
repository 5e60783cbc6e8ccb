pub mod bus;
pub mod bus_assignment;
pub mod bus_template;
pub mod company;
pub mod customer;
pub mod health;
pub mod location;
pub mod route;
pub mod route_schedule;
pub mod schedule;
pub mod seat_tier;
pub mod ticket;
pub mod ticket_sale;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /companies                                   list, create
/// /companies/{id}                              get, update, deactivate (guarded)
/// /companies/{id}/branches                     list, create
/// /companies/{id}/profiles                     list, create
/// /companies/{id}/seat-tiers                   list
/// /companies/{id}/bus-templates                list
///
/// /locations                                   list, create
/// /customers                                   list, create
/// /customers/{id}                              get
///
/// /seat-tiers                                  create
/// /seat-tiers/{id}                             update, delete
///
/// /bus-templates                               create
/// /bus-templates/{id}                          get, update, delete
/// /bus-templates/{id}/layout                   apply editor actions (POST)
///
/// /buses                                       list, create (materializes seats)
/// /buses/{id}                                  get, update, retire
/// /buses/{id}/seats/{seat_id}                  seat status (PATCH)
///
/// /routes                                      list, create
/// /routes/{id}                                 get, update, deactivate (guarded)
/// /routes/{id}/route-schedules                 list
///
/// /route-schedules                             create
/// /route-schedules/{id}                        get, update, delete (guarded)
///
/// /schedules                                   list, generate (POST)
/// /schedules/{id}                              get
/// /schedules/{id}/status                       transition (PATCH)
/// /schedules/{id}/tickets                      list
/// /schedules/{id}/passengers                   passenger manifest
///
/// /bus-assignments                             list, create
/// /bus-assignments/{id}                        get
/// /bus-assignments/{id}/status                 complete or cancel (PATCH)
///
/// /tickets                                     bulk sale (POST)
/// /tickets/{id}                                get
/// /tickets/{id}/cancel                         cancel (PATCH)
///
/// /ticket-sales/step                           advance the sale wizard (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/companies", company::router())
        .nest("/locations", location::router())
        .nest("/customers", customer::router())
        .nest("/seat-tiers", seat_tier::router())
        .nest("/bus-templates", bus_template::router())
        .nest("/buses", bus::router())
        .nest("/routes", route::router())
        .nest("/route-schedules", route_schedule::router())
        .nest("/schedules", schedule::router())
        .nest("/bus-assignments", bus_assignment::router())
        .nest("/tickets", ticket::router())
        .nest("/ticket-sales", ticket_sale::router())
}
