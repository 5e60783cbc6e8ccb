//! HTTP handlers, one module per resource.
//!
//! Handlers validate input, call into `busline_core` for domain rules and
//! `busline_db` repositories for persistence, and wrap results in
//! [`DataResponse`](crate::response::DataResponse).

pub mod bus;
pub mod bus_assignment;
pub mod bus_template;
pub mod company;
pub mod customer;
pub mod location;
pub mod route;
pub mod route_schedule;
pub mod schedule;
pub mod seat_tier;
pub mod ticket;
pub mod ticket_sale;
