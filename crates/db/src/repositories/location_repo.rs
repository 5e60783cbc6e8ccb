//! Repository for the `locations` table.

use sqlx::PgPool;
use busline_core::types::DbId;

use crate::models::location::{CreateLocation, Location};

const COLUMNS: &str = "id, name, city, active, created_at, updated_at";

pub struct LocationRepo;

impl LocationRepo {
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, city)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(input.name.trim())
            .bind(input.city.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE active ORDER BY city, name");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }
}
