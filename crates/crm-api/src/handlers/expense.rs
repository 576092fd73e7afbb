//! Expense handlers.

use axum::Json;
use axum::extract::{Path, State};

use crm_entity::expense::model::{CreateExpense, Expense};

use crate::dto::{ApiResponse, CreateExpenseRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/projects/{id}/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    let expenses = state.expenses.list_by_project(project_id).await?;
    Ok(Json(ApiResponse::ok(expenses)))
}

/// POST /api/projects/{id}/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(body): Json<CreateExpenseRequest>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let expense = state
        .expenses
        .create(&CreateExpense {
            project_id,
            amount: body.amount,
            description: body.description,
            category: body.category,
        })
        .await?;
    Ok(Json(ApiResponse::ok(expense)))
}

/// DELETE /api/expenses/{id}
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.expenses.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
