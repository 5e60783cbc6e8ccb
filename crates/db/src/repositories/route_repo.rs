//! Repository for the `routes` table.

use sqlx::PgPool;
use busline_core::dependencies::DependencyCount;
use busline_core::types::DbId;

use crate::models::route::{CreateRoute, Route, UpdateRoute};

const COLUMNS: &str = "id, name, origin_id, destination_id, estimated_duration, \
    departure_lane, active, created_at, updated_at";

pub struct RouteRepo;

impl RouteRepo {
    pub async fn create(pool: &PgPool, input: &CreateRoute) -> Result<Route, sqlx::Error> {
        let query = format!(
            "INSERT INTO routes
                (name, origin_id, destination_id, estimated_duration, departure_lane)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(input.name.trim())
            .bind(input.origin_id)
            .bind(input.destination_id)
            .bind(input.estimated_duration)
            .bind(&input.departure_lane)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Route>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM routes WHERE id = $1");
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Route>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM routes
             WHERE active OR $1
             ORDER BY name"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoute,
    ) -> Result<Option<Route>, sqlx::Error> {
        let query = format!(
            "UPDATE routes SET
                name = COALESCE($2, name),
                estimated_duration = COALESCE($3, estimated_duration),
                departure_lane = COALESCE($4, departure_lane)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.estimated_duration)
            .bind(&input.departure_lane)
            .fetch_optional(pool)
            .await
    }

    /// Trips that have not finished yet and active bus assignments.
    pub async fn dependency_counts(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<DependencyCount>, sqlx::Error> {
        let (schedules, assignments): (i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM schedules
                 WHERE route_id = $1 AND status IN ('scheduled', 'in_progress', 'delayed')),
                (SELECT COUNT(*) FROM bus_assignments
                 WHERE route_id = $1 AND status = 'active')",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(vec![
            DependencyCount::new("schedules", schedules),
            DependencyCount::new("bus_assignments", assignments),
        ])
    }

    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Route>, sqlx::Error> {
        let query = format!(
            "UPDATE routes SET active = false
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
