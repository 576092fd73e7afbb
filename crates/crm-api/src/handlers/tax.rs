//! Tax tracker handlers.

use axum::Json;
use axum::extract::State;

use crm_entity::tax::model::TaxTracker;

use crate::dto::{AddTaxPaymentRequest, ApiResponse, SetTaxPercentageRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/tax
pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TaxTracker>>, ApiError> {
    let tracker = state.tax.summary().await?;
    Ok(Json(ApiResponse::ok(tracker)))
}

/// POST /api/tax/payment
pub async fn add_payment(
    State(state): State<AppState>,
    Json(body): Json<AddTaxPaymentRequest>,
) -> Result<Json<ApiResponse<TaxTracker>>, ApiError> {
    let tracker = state.tax.add_payment(body.amount).await?;
    Ok(Json(ApiResponse::ok(tracker)))
}

/// PATCH /api/tax/percentage
pub async fn set_percentage(
    State(state): State<AppState>,
    Json(body): Json<SetTaxPercentageRequest>,
) -> Result<Json<ApiResponse<TaxTracker>>, ApiError> {
    let tracker = state.tax.set_percentage(body.percentage).await?;
    Ok(Json(ApiResponse::ok(tracker)))
}

/// POST /api/tax/reset
pub async fn reset(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TaxTracker>>, ApiError> {
    let tracker = state.tax.reset().await?;
    Ok(Json(ApiResponse::ok(tracker)))
}
