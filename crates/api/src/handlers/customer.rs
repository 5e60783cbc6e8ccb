//! Handlers for `/customers`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use busline_core::error::CoreError;
use busline_core::types::DbId;
use busline_db::models::customer::{CreateCustomer, Customer};
use busline_db::repositories::CustomerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/customers
///
/// A repeated `document_id` is a 409.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCustomer>,
) -> AppResult<(StatusCode, Json<DataResponse<Customer>>)> {
    input.validate()?;
    let customer = CustomerRepo::create(&state.pool, &input).await?;
    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// GET /api/v1/customers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Customer>>>> {
    let customers = CustomerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: customers }))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Customer>>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(DataResponse { data: customer }))
}
