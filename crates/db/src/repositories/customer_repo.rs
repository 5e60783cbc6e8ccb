//! Repository for the `customers` table.

use sqlx::PgPool;
use busline_core::types::DbId;

use crate::models::customer::{CreateCustomer, Customer};

const COLUMNS: &str =
    "id, full_name, document_id, phone, email, active, created_at, updated_at";

pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a customer. Document ids are unique (`uq_customers_document_id`).
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (full_name, document_id, phone, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(input.full_name.trim())
            .bind(input.document_id.trim())
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE active ORDER BY full_name");
        sqlx::query_as::<_, Customer>(&query).fetch_all(pool).await
    }
}
