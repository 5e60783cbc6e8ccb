//! Handlers for seat tiers.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;
use busline_core::error::CoreError;
use busline_core::seat_matrix::SeatTemplateMatrix;
use busline_core::types::DbId;
use busline_db::models::seat_tier::{CreateSeatTier, SeatTier, UpdateSeatTier};
use busline_db::repositories::SeatTierRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::company::find_company;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/companies/{company_id}/seat-tiers
pub async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<SeatTier>>>> {
    find_company(&state, company_id).await?;
    let tiers =
        SeatTierRepo::list_by_company(&state.pool, company_id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: tiers }))
}

/// POST /api/v1/seat-tiers
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateSeatTier>,
) -> AppResult<(StatusCode, Json<DataResponse<SeatTier>>)> {
    input.validate()?;
    find_company(&state, input.company_id).await?;
    let tier = SeatTierRepo::create(&state.pool, &input).await?;
    tracing::info!(tier_id = %tier.id, company_id = %tier.company_id, "Seat tier created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tier })))
}

/// PUT /api/v1/seat-tiers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateSeatTier>,
) -> AppResult<Json<DataResponse<SeatTier>>> {
    input.validate()?;
    let tier = SeatTierRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SeatTier",
            id,
        }))?;
    Ok(Json(DataResponse { data: tier }))
}

/// DELETE /api/v1/seat-tiers/{id}
///
/// Soft delete. Seats already materialized keep their tier.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if SeatTierRepo::deactivate(&state.pool, id).await? {
        tracing::info!(tier_id = %id, "Seat tier deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "SeatTier",
            id,
        }))
    }
}

/// Every tier referenced by a non-empty seat must be one of the company's tiers.
///
/// Unassigned seats are ignored here; bus creation rejects them separately.
pub(crate) async fn ensure_company_tiers(
    state: &AppState,
    company_id: DbId,
    matrix: &SeatTemplateMatrix,
) -> AppResult<()> {
    let referenced: Vec<DbId> = matrix.tier_ids().into_iter().collect();
    if referenced.is_empty() {
        return Ok(());
    }
    let known: HashSet<DbId> =
        SeatTierRepo::existing_ids_for_company(&state.pool, company_id, &referenced)
            .await?
            .into_iter()
            .collect();

    let unknown: Vec<DbId> = referenced
        .into_iter()
        .filter(|id| !known.contains(id))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }

    let invalid_seat_count = matrix
        .non_empty_seats()
        .filter(|s| s.tier_uuid().is_some_and(|t| unknown.contains(&t)))
        .count();
    Err(AppError::Core(CoreError::invalid(
        "Invalid seat tier IDs",
        json!({
            "invalid_seat_count": invalid_seat_count,
            "unknown_tier_ids": unknown,
        }),
    )))
}
