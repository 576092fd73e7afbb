//! Business expense handlers: CRUD, receipts, tax reports.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use crm_core::error::AppError;
use crm_entity::business_expense::model::{
    BusinessExpense, CreateBusinessExpense, UpdateBusinessExpense,
};
use crm_service::{ExpenseFilter, MonthlyExpenseBreakdown, YearlyExpenseReport};

use crate::dto::{ApiResponse, BusinessExpenseQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/business-expenses?year=&month=&category=
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<BusinessExpenseQuery>,
) -> Result<Json<ApiResponse<Vec<BusinessExpense>>>, ApiError> {
    let expenses = state
        .business_expenses
        .list(ExpenseFilter {
            year: query.year,
            month: query.month,
            category: query.category,
        })
        .await?;
    Ok(Json(ApiResponse::ok(expenses)))
}

/// GET /api/projects/{id}/business-expenses
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<BusinessExpense>>>, ApiError> {
    let expenses = state.business_expenses.list_by_project(project_id).await?;
    Ok(Json(ApiResponse::ok(expenses)))
}

/// POST /api/business-expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Json(body): Json<CreateBusinessExpense>,
) -> Result<Json<ApiResponse<BusinessExpense>>, ApiError> {
    let expense = state.business_expenses.create(&body).await?;
    Ok(Json(ApiResponse::ok(expense)))
}

/// PATCH /api/business-expenses/{id}
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBusinessExpense>,
) -> Result<Json<ApiResponse<BusinessExpense>>, ApiError> {
    let expense = state.business_expenses.update(id, &body).await?;
    Ok(Json(ApiResponse::ok(expense)))
}

/// DELETE /api/business-expenses/{id}
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.business_expenses.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/business-expenses/{id}/receipt
///
/// Multipart upload with a single `receipt` file part.
pub async fn upload_receipt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<BusinessExpense>>, ApiError> {
    let mut receipt: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("receipt") {
            let name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::validation("Receipt part is missing a file name"))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Failed to read receipt part: {e}")))?;
            receipt = Some((name, data));
        }
    }

    let (name, data) = receipt.ok_or_else(|| AppError::validation("Missing receipt part"))?;
    let expense = state.business_expenses.attach_receipt(id, &name, data).await?;
    Ok(Json(ApiResponse::ok(expense)))
}

/// GET /api/business-expenses/{id}/receipt
pub async fn download_receipt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let (expense, data) = state.business_expenses.receipt(id).await?;
    let filename = expense
        .receipt_key
        .as_deref()
        .and_then(|key| key.rsplit_once('.'))
        .map(|(_, ext)| format!("receipt-{id}.{ext}"))
        .unwrap_or_else(|| format!("receipt-{id}"));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// GET /api/business-expenses/receipts/{year}
///
/// All of a year's receipts as one ZIP archive.
pub async fn download_receipts_archive(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Response, ApiError> {
    let data = state.business_expenses.receipts_archive(year).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"receipts-{year}.zip\""),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// GET /api/business-expenses/yearly-report/{year}
pub async fn yearly_report(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<ApiResponse<YearlyExpenseReport>>, ApiError> {
    let report = state.business_expenses.yearly_report(year).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/business-expenses/monthly-breakdown/{year}
pub async fn monthly_breakdown(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<ApiResponse<Vec<MonthlyExpenseBreakdown>>>, ApiError> {
    let breakdown = state.business_expenses.monthly_breakdown(year).await?;
    Ok(Json(ApiResponse::ok(breakdown)))
}
