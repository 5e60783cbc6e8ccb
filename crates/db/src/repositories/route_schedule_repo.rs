//! Repository for the `route_schedules` table.

use sqlx::PgPool;
use busline_core::dependencies::DependencyCount;
use busline_core::types::DbId;

use crate::models::route::{RouteSchedule, RouteSchedulePattern};

const COLUMNS: &str = "id, route_id, departure_time, operating_days, season_start, \
    season_end, active, created_at, updated_at";

pub struct RouteScheduleRepo;

impl RouteScheduleRepo {
    pub async fn create(
        pool: &PgPool,
        route_id: DbId,
        pattern: &RouteSchedulePattern,
    ) -> Result<RouteSchedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO route_schedules
                (route_id, departure_time, operating_days, season_start, season_end)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RouteSchedule>(&query)
            .bind(route_id)
            .bind(pattern.departure_time)
            .bind(&pattern.operating_days)
            .bind(pattern.season_start)
            .bind(pattern.season_end)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RouteSchedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM route_schedules WHERE id = $1");
        sqlx::query_as::<_, RouteSchedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_route(
        pool: &PgPool,
        route_id: DbId,
    ) -> Result<Vec<RouteSchedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM route_schedules
             WHERE route_id = $1
             ORDER BY departure_time"
        );
        sqlx::query_as::<_, RouteSchedule>(&query)
            .bind(route_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the pattern. The caller merges partial input with the
    /// current row first, so every pattern field is written.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        pattern: &RouteSchedulePattern,
        active: Option<bool>,
    ) -> Result<Option<RouteSchedule>, sqlx::Error> {
        let query = format!(
            "UPDATE route_schedules SET
                departure_time = $2,
                operating_days = $3,
                season_start = $4,
                season_end = $5,
                active = COALESCE($6, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RouteSchedule>(&query)
            .bind(id)
            .bind(pattern.departure_time)
            .bind(&pattern.operating_days)
            .bind(pattern.season_start)
            .bind(pattern.season_end)
            .bind(active)
            .fetch_optional(pool)
            .await
    }

    /// Dated trips generated from this pattern.
    pub async fn dependency_counts(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<DependencyCount>, sqlx::Error> {
        let (schedules,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM schedules WHERE route_schedule_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(vec![DependencyCount::new("schedules", schedules)])
    }

    /// Permanently delete a pattern. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM route_schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
