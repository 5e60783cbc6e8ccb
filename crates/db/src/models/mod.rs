//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts, validated with `validator`
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates

pub mod bus;
pub mod bus_assignment;
pub mod bus_template;
pub mod company;
pub mod customer;
pub mod location;
pub mod route;
pub mod schedule;
pub mod seat_tier;
pub mod ticket;
