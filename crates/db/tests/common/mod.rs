//! Shared fixtures for repository tests.

#![allow(dead_code)]

use chrono::{NaiveTime, TimeZone, Utc};
use sqlx::PgPool;
use busline_core::seat_matrix::SeatTemplateMatrix;
use busline_core::types::{DbId, Timestamp};
use busline_db::models::bus::BusWithSeats;
use busline_db::models::company::{Company, CreateCompany};
use busline_db::models::location::CreateLocation;
use busline_db::models::route::{CreateRoute, Route, RouteSchedule, RouteSchedulePattern};
use busline_db::models::schedule::{NewSchedule, Schedule};
use busline_db::models::seat_tier::{CreateSeatTier, SeatTier};
use busline_db::repositories::bus_repo::NewBus;
use busline_db::repositories::{
    BusRepo, CompanyRepo, LocationRepo, RouteRepo, RouteScheduleRepo, ScheduleRepo, SeatTierRepo,
};

pub fn at(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

pub async fn company(pool: &PgPool, name: &str) -> Company {
    CompanyRepo::create(
        pool,
        &CreateCompany {
            name: name.to_string(),
            tax_id: None,
            phone: None,
            email: None,
        },
    )
    .await
    .unwrap()
}

pub async fn tier(pool: &PgPool, company_id: DbId, name: &str) -> SeatTier {
    SeatTierRepo::create(
        pool,
        &CreateSeatTier {
            company_id,
            name: name.to_string(),
            description: None,
            base_price: 25.0,
        },
    )
    .await
    .unwrap()
}

/// A rows x cols single-floor layout with every seat on `tier_id`.
pub fn tiered_matrix(rows: u32, cols: u32, tier_id: DbId) -> SeatTemplateMatrix {
    let mut matrix = SeatTemplateMatrix::single_floor(rows, cols).unwrap();
    for seat in &mut matrix.first_floor.seats {
        seat.tier_id = tier_id.to_string();
    }
    matrix
}

/// A bus materialized straight from `matrix`, bypassing the template table.
pub async fn bus(pool: &PgPool, company_id: DbId, plate: &str, matrix: &SeatTemplateMatrix) -> BusWithSeats {
    let template = busline_db::repositories::BusTemplateRepo::create(
        pool,
        company_id,
        &format!("Template {plate}"),
        None,
        matrix,
    )
    .await
    .unwrap();
    let seats = matrix.materialize().unwrap();
    let json = matrix.to_json();
    BusRepo::create_with_seats(
        pool,
        &NewBus {
            company_id,
            template_id: template.id,
            plate_number: plate,
            model: None,
            year: None,
            seat_matrix: &json,
        },
        &seats,
    )
    .await
    .unwrap()
}

pub async fn route(pool: &PgPool, duration_minutes: i32) -> Route {
    let origin = LocationRepo::create(
        pool,
        &CreateLocation {
            name: "North Terminal".to_string(),
            city: "Springfield".to_string(),
        },
    )
    .await
    .unwrap();
    let destination = LocationRepo::create(
        pool,
        &CreateLocation {
            name: "Central Station".to_string(),
            city: "Shelbyville".to_string(),
        },
    )
    .await
    .unwrap();
    RouteRepo::create(
        pool,
        &CreateRoute {
            name: "Springfield - Shelbyville".to_string(),
            origin_id: origin.id,
            destination_id: destination.id,
            estimated_duration: duration_minutes,
            departure_lane: Some("7".to_string()),
        },
    )
    .await
    .unwrap()
}

pub async fn route_schedule(pool: &PgPool, route_id: DbId) -> RouteSchedule {
    RouteScheduleRepo::create(
        pool,
        route_id,
        &RouteSchedulePattern {
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            operating_days: vec!["monday".to_string(), "wednesday".to_string()],
            season_start: None,
            season_end: None,
        },
    )
    .await
    .unwrap()
}

pub async fn schedule(pool: &PgPool, route: &Route, pattern_id: DbId, departure: Timestamp) -> Schedule {
    ScheduleRepo::insert_if_absent(
        pool,
        &NewSchedule {
            route_id: route.id,
            route_schedule_id: pattern_id,
            departure_date: departure,
            estimated_arrival_time: departure + chrono::Duration::minutes(route.estimated_duration.into()),
            price: 40.0,
        },
    )
    .await
    .unwrap()
    .expect("fresh schedule")
}
