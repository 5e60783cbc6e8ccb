//! Stateless driver for the counter sale wizard.
//!
//! The client keeps the wizard value and posts it back with the next action.
//! Nothing is persisted until the reviewed selections are submitted to
//! `POST /api/v1/tickets`.

use axum::Json;
use serde::{Deserialize, Serialize};
use busline_core::sale_wizard::{Checkout, SaleAction, SaleStep, SaleWizard};

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct SaleStepRequest {
    #[serde(default)]
    pub state: SaleWizard,
    pub action: SaleAction,
}

#[derive(Debug, Serialize)]
pub struct SaleStepResponse {
    pub state: SaleWizard,
    /// Human-readable label of the new step.
    pub step_label: &'static str,
    /// Present once the sale has been reviewed.
    pub checkout: Option<Checkout>,
}

/// POST /api/v1/ticket-sales/step
pub async fn step(
    ApiJson(input): ApiJson<SaleStepRequest>,
) -> AppResult<Json<DataResponse<SaleStepResponse>>> {
    let from = input.state.step;
    let next = input.state.apply(input.action)?;

    let checkout = match next.step {
        SaleStep::Review | SaleStep::Confirmed => Some(next.checkout()?),
        _ => None,
    };
    tracing::debug!(from = from.label(), to = next.step.label(), "Sale wizard step");

    Ok(Json(DataResponse {
        data: SaleStepResponse {
            step_label: next.step.label(),
            checkout,
            state: next,
        },
    }))
}
