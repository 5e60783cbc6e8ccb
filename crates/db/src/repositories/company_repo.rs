//! Repositories for `companies`, `branches` and `profiles`.

use sqlx::PgPool;
use busline_core::dependencies::DependencyCount;
use busline_core::types::DbId;

use crate::models::company::{
    Branch, Company, CreateBranch, CreateCompany, CreateProfile, Profile, UpdateCompany,
};

const COLUMNS: &str = "id, name, tax_id, phone, email, active, created_at, updated_at";

/// Provides CRUD and the guarded deactivation for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    pub async fn create(pool: &PgPool, input: &CreateCompany) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies (name, tax_id, phone, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(input.name.trim())
            .bind(&input.tax_id)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List companies by name. Inactive rows are skipped unless requested.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies
             WHERE active OR $1
             ORDER BY name"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a company. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompany,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                tax_id = COALESCE($3, tax_id),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.tax_id)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Count the active rows that keep a company from being deactivated.
    pub async fn dependency_counts(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<DependencyCount>, sqlx::Error> {
        let (buses, profiles, branches, templates, tiers): (i64, i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT
                    (SELECT COUNT(*) FROM buses WHERE company_id = $1 AND is_active),
                    (SELECT COUNT(*) FROM profiles WHERE company_id = $1 AND active),
                    (SELECT COUNT(*) FROM branches WHERE company_id = $1 AND active),
                    (SELECT COUNT(*) FROM bus_templates WHERE company_id = $1 AND is_active),
                    (SELECT COUNT(*) FROM seat_tiers WHERE company_id = $1 AND is_active)",
            )
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(vec![
            DependencyCount::new("buses", buses),
            DependencyCount::new("profiles", profiles),
            DependencyCount::new("branches", branches),
            DependencyCount::new("bus_templates", templates),
            DependencyCount::new("seat_tiers", tiers),
        ])
    }

    /// Flip `active` to false. Returns `None` if no such company exists.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET active = false
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

const BRANCH_COLUMNS: &str = "id, company_id, name, address, active, created_at, updated_at";

pub struct BranchRepo;

impl BranchRepo {
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateBranch,
    ) -> Result<Branch, sqlx::Error> {
        let query = format!(
            "INSERT INTO branches (company_id, name, address)
             VALUES ($1, $2, $3)
             RETURNING {BRANCH_COLUMNS}"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(company_id)
            .bind(input.name.trim())
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {BRANCH_COLUMNS} FROM branches
             WHERE company_id = $1
             ORDER BY name"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

const PROFILE_COLUMNS: &str =
    "id, company_id, full_name, role, email, active, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile. A missing role defaults to `staff`.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (company_id, full_name, role, email)
             VALUES ($1, $2, COALESCE($3, 'staff'), $4)
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(company_id)
            .bind(input.full_name.trim())
            .bind(&input.role)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles
             WHERE company_id = $1
             ORDER BY full_name"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }
}
