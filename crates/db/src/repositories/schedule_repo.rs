//! Repository for the `schedules` table.

use sqlx::PgPool;
use busline_core::types::DbId;

use crate::models::schedule::{NewSchedule, Schedule, ScheduleFilter};

const COLUMNS: &str = "id, route_id, route_schedule_id, bus_id, departure_date, \
    estimated_arrival_time, price::float8 AS price, status, created_at, updated_at";

pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Insert a trip unless one already exists for the same pattern and
    /// departure. Returns `None` when the row was already there.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &NewSchedule,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedules
                (route_id, route_schedule_id, departure_date, estimated_arrival_time, price)
             VALUES ($1, $2, $3, $4, $5::numeric)
             ON CONFLICT ON CONSTRAINT uq_schedules_route_schedule_departure DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(input.route_id)
            .bind(input.route_schedule_id)
            .bind(input.departure_date)
            .bind(input.estimated_arrival_time)
            .bind(input.price)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schedules WHERE id = $1");
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock the schedule row for the rest of the transaction.
    pub async fn lock_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schedules WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List trips by departure, filtered by route and departure bounds.
    pub async fn list(pool: &PgPool, filter: &ScheduleFilter) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE ($1::uuid IS NULL OR route_id = $1)
               AND ($2::timestamptz IS NULL OR departure_date >= $2)
               AND ($3::timestamptz IS NULL OR departure_date <= $3)
             ORDER BY departure_date"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(filter.route_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(pool)
            .await
    }

    /// Move the trip from `from` to `to`. Returns `None` if the row is gone
    /// or its status is no longer `from`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!(
            "UPDATE schedules SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Point the trip at a bus, or clear it.
    pub async fn set_bus(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        bus_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE schedules SET bus_id = $2 WHERE id = $1")
            .bind(id)
            .bind(bus_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
