//! Repository for the `seat_tiers` table.

use sqlx::PgPool;
use busline_core::types::DbId;

use crate::models::seat_tier::{CreateSeatTier, SeatTier, UpdateSeatTier};

const COLUMNS: &str = "id, company_id, name, description, base_price::float8 AS base_price, \
    is_active, created_at, updated_at";

pub struct SeatTierRepo;

impl SeatTierRepo {
    pub async fn create(pool: &PgPool, input: &CreateSeatTier) -> Result<SeatTier, sqlx::Error> {
        let query = format!(
            "INSERT INTO seat_tiers (company_id, name, description, base_price)
             VALUES ($1, $2, $3, $4::numeric)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeatTier>(&query)
            .bind(input.company_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.base_price)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SeatTier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seat_tiers WHERE id = $1");
        sqlx::query_as::<_, SeatTier>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<SeatTier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM seat_tiers
             WHERE company_id = $1 AND (is_active OR $2)
             ORDER BY base_price DESC, name"
        );
        sqlx::query_as::<_, SeatTier>(&query)
            .bind(company_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Of `ids`, return those that are active tiers of `company_id`.
    pub async fn existing_ids_for_company(
        pool: &PgPool,
        company_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM seat_tiers
             WHERE company_id = $1 AND is_active AND id = ANY($2)",
        )
        .bind(company_id)
        .bind(ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeatTier,
    ) -> Result<Option<SeatTier>, sqlx::Error> {
        let query = format!(
            "UPDATE seat_tiers SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                base_price = COALESCE($4::numeric, base_price),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeatTier>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.base_price)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete. Returns `true` if an active tier was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE seat_tiers SET is_active = false WHERE id = $1 AND is_active")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
