//! Domain logic for the bus back office.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! build on these types and rules.

pub mod assignment;
pub mod dependencies;
pub mod error;
pub mod layout_editor;
pub mod plate;
pub mod sale_wizard;
pub mod schedule_expansion;
pub mod seat_matrix;
pub mod status;
pub mod types;
