//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` (or an open transaction) as the first argument.

pub mod bus_assignment_repo;
pub mod bus_repo;
pub mod bus_template_repo;
pub mod company_repo;
pub mod customer_repo;
pub mod location_repo;
pub mod route_repo;
pub mod route_schedule_repo;
pub mod schedule_repo;
pub mod seat_tier_repo;
pub mod ticket_repo;

pub use bus_assignment_repo::BusAssignmentRepo;
pub use bus_repo::BusRepo;
pub use bus_template_repo::BusTemplateRepo;
pub use company_repo::{BranchRepo, CompanyRepo, ProfileRepo};
pub use customer_repo::CustomerRepo;
pub use location_repo::LocationRepo;
pub use route_repo::RouteRepo;
pub use route_schedule_repo::RouteScheduleRepo;
pub use schedule_repo::ScheduleRepo;
pub use seat_tier_repo::SeatTierRepo;
pub use ticket_repo::TicketRepo;
