//! Repository for `buses` and `bus_seats`.

use sqlx::PgPool;
use busline_core::seat_matrix::MaterializedSeat;
use busline_core::types::DbId;

use crate::models::bus::{Bus, BusSeat, BusWithSeats, UpdateBusSeat};

const COLUMNS: &str = "id, company_id, template_id, plate_number, model, year, \
    maintenance_status, is_active, seat_matrix, created_at, updated_at";

const SEAT_COLUMNS: &str =
    "id, bus_id, seat_number, tier_id, status, is_active, created_at, updated_at";

/// Field values for a new bus, already normalized.
#[derive(Debug)]
pub struct NewBus<'a> {
    pub company_id: DbId,
    pub template_id: DbId,
    pub plate_number: &'a str,
    pub model: Option<&'a str>,
    pub year: Option<i32>,
    pub seat_matrix: &'a serde_json::Value,
}

pub struct BusRepo;

impl BusRepo {
    /// Insert the bus and one seat row per materialized seat.
    ///
    /// Runs in a single transaction: either the bus and all of its seats are
    /// written, or nothing is.
    pub async fn create_with_seats(
        pool: &PgPool,
        bus: &NewBus<'_>,
        seats: &[MaterializedSeat],
    ) -> Result<BusWithSeats, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO buses
                (company_id, template_id, plate_number, model, year, seat_matrix)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Bus>(&query)
            .bind(bus.company_id)
            .bind(bus.template_id)
            .bind(bus.plate_number)
            .bind(bus.model)
            .bind(bus.year)
            .bind(bus.seat_matrix)
            .fetch_one(&mut *tx)
            .await?;

        let seat_numbers: Vec<&str> = seats.iter().map(|s| s.seat_number.as_str()).collect();
        let tier_ids: Vec<DbId> = seats.iter().map(|s| s.tier_id).collect();
        let query = format!(
            "INSERT INTO bus_seats (bus_id, seat_number, tier_id)
             SELECT $1, seat_number, tier_id
             FROM UNNEST($2::text[], $3::uuid[]) AS s(seat_number, tier_id)
             RETURNING {SEAT_COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, BusSeat>(&query)
            .bind(created.id)
            .bind(&seat_numbers)
            .bind(&tier_ids)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        rows.sort_by(|a, b| a.seat_number.cmp(&b.seat_number));
        Ok(BusWithSeats {
            bus: created,
            seats: rows,
        })
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buses WHERE id = $1");
        sqlx::query_as::<_, Bus>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock the bus row for the rest of the transaction.
    pub async fn lock_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Bus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buses WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Bus>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List buses by plate, optionally for a single company.
    pub async fn list(
        pool: &PgPool,
        company_id: Option<DbId>,
        include_inactive: bool,
    ) -> Result<Vec<Bus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM buses
             WHERE ($1::uuid IS NULL OR company_id = $1) AND (is_active OR $2)
             ORDER BY plate_number"
        );
        sqlx::query_as::<_, Bus>(&query)
            .bind(company_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        plate_number: Option<&str>,
        model: Option<&str>,
        year: Option<i32>,
        maintenance_status: Option<&str>,
    ) -> Result<Option<Bus>, sqlx::Error> {
        let query = format!(
            "UPDATE buses SET
                plate_number = COALESCE($2, plate_number),
                model = COALESCE($3, model),
                year = COALESCE($4, year),
                maintenance_status = COALESCE($5, maintenance_status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bus>(&query)
            .bind(id)
            .bind(plate_number)
            .bind(model)
            .bind(year)
            .bind(maintenance_status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete. Returns `true` if an active bus was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE buses SET is_active = false, maintenance_status = 'retired'
             WHERE id = $1 AND is_active",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Seats
    // -----------------------------------------------------------------------

    pub async fn list_seats(pool: &PgPool, bus_id: DbId) -> Result<Vec<BusSeat>, sqlx::Error> {
        let query = format!(
            "SELECT {SEAT_COLUMNS} FROM bus_seats
             WHERE bus_id = $1
             ORDER BY seat_number"
        );
        sqlx::query_as::<_, BusSeat>(&query)
            .bind(bus_id)
            .fetch_all(pool)
            .await
    }

    /// Seats of `bus_id` among `seat_ids`. Ids from another bus are omitted.
    pub async fn find_seats(
        pool: &PgPool,
        bus_id: DbId,
        seat_ids: &[DbId],
    ) -> Result<Vec<BusSeat>, sqlx::Error> {
        let query = format!(
            "SELECT {SEAT_COLUMNS} FROM bus_seats
             WHERE bus_id = $1 AND id = ANY($2)"
        );
        sqlx::query_as::<_, BusSeat>(&query)
            .bind(bus_id)
            .bind(seat_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn update_seat(
        pool: &PgPool,
        bus_id: DbId,
        seat_id: DbId,
        input: &UpdateBusSeat,
    ) -> Result<Option<BusSeat>, sqlx::Error> {
        let query = format!(
            "UPDATE bus_seats SET
                status = COALESCE($3, status),
                is_active = COALESCE($4, is_active)
             WHERE bus_id = $1 AND id = $2
             RETURNING {SEAT_COLUMNS}"
        );
        sqlx::query_as::<_, BusSeat>(&query)
            .bind(bus_id)
            .bind(seat_id)
            .bind(&input.status)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
