//! Repository for `tickets` and the `passenger_list` manifest.
//!
//! A ticket and its passenger row are always written and removed together
//! inside the caller's transaction.

use sqlx::PgPool;
use busline_core::types::DbId;

use crate::models::ticket::{NewTicket, Passenger, Ticket, TicketWithPassenger};

const COLUMNS: &str = "id, schedule_id, customer_id, bus_seat_id, status, \
    price::float8 AS price, purchased_at, notes, created_at, updated_at";

const PASSENGER_COLUMNS: &str = "id, ticket_id, schedule_id, seat_number, passenger_name, \
    passenger_document, created_at";

pub struct TicketRepo;

impl TicketRepo {
    /// Insert one ticket plus one passenger row per line.
    ///
    /// The first failure aborts; the caller's transaction then rolls back
    /// every line written so far.
    pub async fn create_batch(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        schedule_id: DbId,
        customer_id: DbId,
        notes: Option<&str>,
        lines: &[NewTicket],
    ) -> Result<Vec<TicketWithPassenger>, sqlx::Error> {
        let ticket_query = format!(
            "INSERT INTO tickets (schedule_id, customer_id, bus_seat_id, price, notes)
             VALUES ($1, $2, $3, $4::numeric, $5)
             RETURNING {COLUMNS}"
        );
        let passenger_query = format!(
            "INSERT INTO passenger_list
                (ticket_id, schedule_id, seat_number, passenger_name, passenger_document)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PASSENGER_COLUMNS}"
        );

        let mut created = Vec::with_capacity(lines.len());
        for line in lines {
            let ticket = sqlx::query_as::<_, Ticket>(&ticket_query)
                .bind(schedule_id)
                .bind(customer_id)
                .bind(line.bus_seat_id)
                .bind(line.price)
                .bind(notes)
                .fetch_one(&mut **tx)
                .await?;

            let passenger = sqlx::query_as::<_, Passenger>(&passenger_query)
                .bind(ticket.id)
                .bind(schedule_id)
                .bind(&line.seat_number)
                .bind(line.passenger_name.trim())
                .bind(&line.passenger_document)
                .fetch_one(&mut **tx)
                .await?;

            created.push(TicketWithPassenger { ticket, passenger });
        }
        Ok(created)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_schedule(
        pool: &PgPool,
        schedule_id: DbId,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets
             WHERE schedule_id = $1
             ORDER BY purchased_at, id"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(schedule_id)
            .fetch_all(pool)
            .await
    }

    /// Boarding manifest for a trip, by seat.
    pub async fn passengers_for_schedule(
        pool: &PgPool,
        schedule_id: DbId,
    ) -> Result<Vec<Passenger>, sqlx::Error> {
        let query = format!(
            "SELECT {PASSENGER_COLUMNS} FROM passenger_list
             WHERE schedule_id = $1
             ORDER BY seat_number"
        );
        sqlx::query_as::<_, Passenger>(&query)
            .bind(schedule_id)
            .fetch_all(pool)
            .await
    }

    /// Cancel an active ticket and drop its passenger row in one
    /// transaction. Returns `None` if the ticket was not active.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE tickets SET status = 'cancelled'
             WHERE id = $1 AND status = 'active'
             RETURNING {COLUMNS}"
        );
        let Some(ticket) = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM passenger_list WHERE ticket_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(ticket))
    }
}
