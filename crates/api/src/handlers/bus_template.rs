//! Handlers for bus type templates and their seat layout.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use busline_core::error::CoreError;
use busline_core::layout_editor::{LayoutAction, LayoutEditor, SecondFloorPolicy};
use busline_core::seat_matrix::{Floor, SeatTemplateMatrix};
use busline_core::types::DbId;
use busline_db::models::bus_template::{
    ApplyLayoutActions, BusTemplate, BusTemplateWithStats, CreateBusTemplate, GridSize,
    UpdateBusTemplate,
};
use busline_db::repositories::BusTemplateRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::handlers::company::find_company;
use crate::handlers::seat_tier::ensure_company_tiers;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Grid used when a template is created without dimensions or a matrix.
const DEFAULT_GRID: GridSize = GridSize {
    rows: 10,
    seats_per_row: 4,
};

/// POST /api/v1/bus-templates
///
/// Accepts either a full `seat_template_matrix` or grid dimensions. A
/// `second_floor` grid is cloned from the first floor and then resized if
/// its dimensions differ.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateBusTemplate>,
) -> AppResult<(StatusCode, Json<DataResponse<BusTemplateWithStats>>)> {
    input.validate()?;
    find_company(&state, input.company_id).await?;

    let matrix = match &input.seat_template_matrix {
        Some(value) => SeatTemplateMatrix::from_json(value)?,
        None => build_matrix(input.first_floor, input.second_floor)?,
    };
    ensure_company_tiers(&state, input.company_id, &matrix).await?;

    let template = BusTemplateRepo::create(
        &state.pool,
        input.company_id,
        &input.name,
        input.description.as_deref(),
        &matrix,
    )
    .await?;

    tracing::info!(
        template_id = %template.id,
        company_id = %template.company_id,
        capacity = template.total_capacity,
        "Bus template created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: with_stats(template, &matrix),
        }),
    ))
}

/// GET /api/v1/companies/{company_id}/bus-templates
pub async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<BusTemplate>>>> {
    find_company(&state, company_id).await?;
    let templates =
        BusTemplateRepo::list_by_company(&state.pool, company_id, params.include_inactive)
            .await?;
    Ok(Json(DataResponse { data: templates }))
}

/// GET /api/v1/bus-templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BusTemplateWithStats>>> {
    let template = find_template(&state, id).await?;
    let matrix = SeatTemplateMatrix::from_json(&template.seat_template_matrix)?;
    Ok(Json(DataResponse {
        data: with_stats(template, &matrix),
    }))
}

/// PUT /api/v1/bus-templates/{id}
///
/// Buses already built from this template keep their own snapshot.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateBusTemplate>,
) -> AppResult<Json<DataResponse<BusTemplateWithStats>>> {
    input.validate()?;
    let existing = find_template(&state, id).await?;

    let matrix = input
        .seat_template_matrix
        .as_ref()
        .map(SeatTemplateMatrix::from_json)
        .transpose()?;
    if let Some(matrix) = &matrix {
        ensure_company_tiers(&state, existing.company_id, matrix).await?;
    }

    let template = BusTemplateRepo::update(
        &state.pool,
        id,
        input.name.as_deref(),
        input.description.as_deref(),
        matrix.as_ref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "BusTemplate",
        id,
    }))?;

    let stored = SeatTemplateMatrix::from_json(&template.seat_template_matrix)?;
    Ok(Json(DataResponse {
        data: with_stats(template, &stored),
    }))
}

/// POST /api/v1/bus-templates/{id}/layout
///
/// Replays the editor actions against the stored layout and saves the result.
/// Adding a second floor here requires every first-floor seat to have a tier.
pub async fn apply_layout(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<ApplyLayoutActions>,
) -> AppResult<Json<DataResponse<BusTemplateWithStats>>> {
    let existing = find_template(&state, id).await?;
    let matrix = SeatTemplateMatrix::from_json(&existing.seat_template_matrix)?;

    let action_count = input.actions.len();
    let edited = LayoutEditor::new(matrix, SecondFloorPolicy::RequireAssignedTiers)
        .apply_all(input.actions)?
        .into_matrix();
    ensure_company_tiers(&state, existing.company_id, &edited).await?;

    let template = BusTemplateRepo::update(&state.pool, id, None, None, Some(&edited))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusTemplate",
            id,
        }))?;

    tracing::info!(
        template_id = %id,
        actions = action_count,
        capacity = template.total_capacity,
        "Bus template layout updated",
    );

    Ok(Json(DataResponse {
        data: with_stats(template, &edited),
    }))
}

/// DELETE /api/v1/bus-templates/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BusTemplateRepo::deactivate(&state.pool, id).await? {
        tracing::info!(template_id = %id, "Bus template deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "BusTemplate",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_template(state: &AppState, id: DbId) -> AppResult<BusTemplate> {
    BusTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BusTemplate",
            id,
        }))
}

/// Build a fresh layout from grid dimensions using the create-flow policy.
fn build_matrix(
    first: Option<GridSize>,
    second: Option<GridSize>,
) -> Result<SeatTemplateMatrix, CoreError> {
    let first = first.unwrap_or(DEFAULT_GRID);
    let matrix = SeatTemplateMatrix::single_floor(first.rows, first.seats_per_row)?;

    let Some(second) = second else {
        return Ok(matrix);
    };

    let mut actions = vec![LayoutAction::EnableSecondFloor];
    if second.rows != first.rows || second.seats_per_row != first.seats_per_row {
        actions.push(LayoutAction::Resize {
            floor: Floor::Second,
            rows: second.rows,
            seats_per_row: second.seats_per_row,
        });
    }
    Ok(LayoutEditor::new(matrix, SecondFloorPolicy::CloneFirstFloor)
        .apply_all(actions)?
        .into_matrix())
}

fn with_stats(template: BusTemplate, matrix: &SeatTemplateMatrix) -> BusTemplateWithStats {
    BusTemplateWithStats {
        template,
        unassigned_seat_count: matrix.unassigned_seat_count(),
    }
}
