//! Repository for the `bus_assignments` table.
//!
//! Creation is check-then-insert under a row lock on the bus, so two
//! concurrent requests for the same bus serialize. The exclusion constraint
//! `ex_bus_assignments_no_overlap` rejects anything that slips past.

use sqlx::PgPool;
use busline_core::assignment::{overlapping, TimeWindow};
use busline_core::types::{DbId, Timestamp};

use crate::models::bus_assignment::{BusAssignment, CreateBusAssignment};
use crate::repositories::{BusRepo, ScheduleRepo};

const COLUMNS: &str = "id, bus_id, route_id, schedule_id, start_time, end_time, status, \
    assigned_at, created_at, updated_at";

/// Result of an attempted assignment.
#[derive(Debug)]
pub enum AssignmentOutcome {
    Created(BusAssignment),
    BusNotFound,
    /// Active windows on the bus that intersect the request.
    Overlaps(Vec<TimeWindow>),
}

pub struct BusAssignmentRepo;

impl BusAssignmentRepo {
    /// Create an active assignment and attach the bus to the schedule, or
    /// report why not. Everything happens in one transaction.
    pub async fn create_checked(
        pool: &PgPool,
        input: &CreateBusAssignment,
    ) -> Result<AssignmentOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if BusRepo::lock_for_update(&mut tx, input.bus_id).await?.is_none() {
            return Ok(AssignmentOutcome::BusNotFound);
        }

        let requested = TimeWindow {
            start: input.start_time,
            end: input.end_time,
        };
        let taken = Self::active_windows(&mut tx, input.bus_id).await?;
        let colliding = overlapping(&requested, &taken);
        if !colliding.is_empty() {
            return Ok(AssignmentOutcome::Overlaps(colliding));
        }

        let query = format!(
            "INSERT INTO bus_assignments (bus_id, route_id, schedule_id, start_time, end_time)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, BusAssignment>(&query)
            .bind(input.bus_id)
            .bind(input.route_id)
            .bind(input.schedule_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_one(&mut *tx)
            .await?;

        ScheduleRepo::set_bus(&mut tx, input.schedule_id, Some(input.bus_id)).await?;

        tx.commit().await?;
        Ok(AssignmentOutcome::Created(created))
    }

    /// Every active window on `bus_id`, earliest first.
    async fn active_windows(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        bus_id: DbId,
    ) -> Result<Vec<TimeWindow>, sqlx::Error> {
        let rows: Vec<(Timestamp, Timestamp)> = sqlx::query_as(
            "SELECT start_time, end_time FROM bus_assignments
             WHERE bus_id = $1 AND status = 'active'
             ORDER BY start_time",
        )
        .bind(bus_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(start, end)| TimeWindow { start, end })
            .collect())
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BusAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bus_assignments WHERE id = $1");
        sqlx::query_as::<_, BusAssignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        bus_id: Option<DbId>,
    ) -> Result<Vec<BusAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bus_assignments
             WHERE $1::uuid IS NULL OR bus_id = $1
             ORDER BY start_time"
        );
        sqlx::query_as::<_, BusAssignment>(&query)
            .bind(bus_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_active_for_bus(pool: &PgPool, bus_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bus_assignments WHERE bus_id = $1 AND status = 'active'",
        )
        .bind(bus_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Move an active assignment to `status`. Cancelling also detaches the
    /// bus from its schedule. Returns `None` if the assignment is no longer
    /// active.
    pub async fn finish(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<BusAssignment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE bus_assignments SET status = $2
             WHERE id = $1 AND status = 'active'
             RETURNING {COLUMNS}"
        );
        let Some(updated) = sqlx::query_as::<_, BusAssignment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if status == "cancelled" {
            sqlx::query("UPDATE schedules SET bus_id = NULL WHERE id = $1 AND bus_id = $2")
                .bind(updated.schedule_id)
                .bind(updated.bus_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(updated))
    }
}
