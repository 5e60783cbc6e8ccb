//! Repository for the `bus_templates` table.

use sqlx::PgPool;
use busline_core::seat_matrix::SeatTemplateMatrix;
use busline_core::types::DbId;

use crate::models::bus_template::BusTemplate;

const COLUMNS: &str = "id, company_id, name, description, total_capacity, \
    seat_template_matrix, is_active, created_at, updated_at";

/// Templates always store a capacity derived from their matrix.
pub struct BusTemplateRepo;

impl BusTemplateRepo {
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        name: &str,
        description: Option<&str>,
        matrix: &SeatTemplateMatrix,
    ) -> Result<BusTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO bus_templates
                (company_id, name, description, total_capacity, seat_template_matrix)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BusTemplate>(&query)
            .bind(company_id)
            .bind(name.trim())
            .bind(description)
            .bind(matrix.total_capacity())
            .bind(matrix.to_json())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BusTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bus_templates WHERE id = $1");
        sqlx::query_as::<_, BusTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<BusTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bus_templates
             WHERE company_id = $1 AND (is_active OR $2)
             ORDER BY name"
        );
        sqlx::query_as::<_, BusTemplate>(&query)
            .bind(company_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update name, description and/or layout. A new layout also rewrites
    /// `total_capacity`. Existing buses keep their own snapshot.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        description: Option<&str>,
        matrix: Option<&SeatTemplateMatrix>,
    ) -> Result<Option<BusTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE bus_templates SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                total_capacity = COALESCE($4, total_capacity),
                seat_template_matrix = COALESCE($5, seat_template_matrix)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BusTemplate>(&query)
            .bind(id)
            .bind(name.map(str::trim))
            .bind(description)
            .bind(matrix.map(SeatTemplateMatrix::total_capacity))
            .bind(matrix.map(SeatTemplateMatrix::to_json))
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete. Returns `true` if an active template was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE bus_templates SET is_active = false WHERE id = $1 AND is_active")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
