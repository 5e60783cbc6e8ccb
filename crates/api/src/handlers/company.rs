//! Handlers for `/companies` and their nested branches and profiles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use busline_core::dependencies::ensure_no_dependencies;
use busline_core::error::CoreError;
use busline_core::types::DbId;
use busline_db::models::company::{
    Branch, Company, CreateBranch, CreateCompany, CreateProfile, Profile, UpdateCompany,
};
use busline_db::repositories::{BranchRepo, CompanyRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/companies
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCompany>,
) -> AppResult<(StatusCode, Json<DataResponse<Company>>)> {
    input.validate()?;
    let company = CompanyRepo::create(&state.pool, &input).await?;
    tracing::info!(company_id = %company.id, name = %company.name, "Company created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: company })))
}

/// GET /api/v1/companies
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Company>>>> {
    let companies = CompanyRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: companies }))
}

/// GET /api/v1/companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    let company = find_company(&state, id).await?;
    Ok(Json(DataResponse { data: company }))
}

/// PUT /api/v1/companies/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateCompany>,
) -> AppResult<Json<DataResponse<Company>>> {
    input.validate()?;
    let company = CompanyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    Ok(Json(DataResponse { data: company }))
}

/// DELETE /api/v1/companies/{id}
///
/// Soft-deactivates the company. Refused with the dependency breakdown while
/// it still has active buses, profiles, branches, templates or seat tiers.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    find_company(&state, id).await?;

    let counts = CompanyRepo::dependency_counts(&state.pool, id).await?;
    ensure_no_dependencies("Company", counts)?;

    let company = CompanyRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    tracing::info!(company_id = %id, "Company deactivated");
    Ok(Json(DataResponse { data: company }))
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// GET /api/v1/companies/{id}/branches
pub async fn list_branches(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Branch>>>> {
    find_company(&state, company_id).await?;
    let branches = BranchRepo::list_by_company(&state.pool, company_id).await?;
    Ok(Json(DataResponse { data: branches }))
}

/// POST /api/v1/companies/{id}/branches
pub async fn create_branch(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
    ApiJson(input): ApiJson<CreateBranch>,
) -> AppResult<(StatusCode, Json<DataResponse<Branch>>)> {
    input.validate()?;
    find_company(&state, company_id).await?;
    let branch = BranchRepo::create(&state.pool, company_id, &input).await?;
    tracing::info!(company_id = %company_id, branch_id = %branch.id, "Branch created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: branch })))
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// GET /api/v1/companies/{id}/profiles
pub async fn list_profiles(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    find_company(&state, company_id).await?;
    let profiles = ProfileRepo::list_by_company(&state.pool, company_id).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// POST /api/v1/companies/{id}/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
    ApiJson(input): ApiJson<CreateProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<Profile>>)> {
    input.validate()?;
    find_company(&state, company_id).await?;
    let profile = ProfileRepo::create(&state.pool, company_id, &input).await?;
    tracing::info!(company_id = %company_id, profile_id = %profile.id, "Profile created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_company(state: &AppState, id: DbId) -> AppResult<Company> {
    CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))
}
