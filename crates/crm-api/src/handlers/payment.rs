//! Payment handlers.

use axum::Json;
use axum::extract::{Path, State};

use crm_entity::payment::model::{CreatePayment, Payment};

use crate::dto::{ApiResponse, CreatePaymentRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/projects/{id}/payments
pub async fn list_payments(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Payment>>>, ApiError> {
    let payments = state.payments.list_by_project(project_id).await?;
    Ok(Json(ApiResponse::ok(payments)))
}

/// POST /api/projects/{id}/payments
pub async fn create_payment(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(body): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state
        .payments
        .create(&CreatePayment {
            project_id,
            amount: body.amount,
            note: body.note,
        })
        .await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// DELETE /api/payments/{id}
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.payments.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
