//! Finance report handlers.

use axum::Json;
use axum::extract::{Query, State};

use crm_service::MonthlySummary;

use crate::dto::{ApiResponse, BreakdownQuery, MonthlySummaryQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/reports/monthly?year=&month=
pub async fn monthly_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthlySummaryQuery>,
) -> Result<Json<ApiResponse<MonthlySummary>>, ApiError> {
    let summary = state.reports.monthly_summary(query.year, query.month).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/reports/breakdown?months=6
pub async fn monthly_breakdown(
    State(state): State<AppState>,
    Query(query): Query<BreakdownQuery>,
) -> Result<Json<ApiResponse<Vec<MonthlySummary>>>, ApiError> {
    let summaries = state
        .reports
        .monthly_breakdown(query.months.unwrap_or(6))
        .await?;
    Ok(Json(ApiResponse::ok(summaries)))
}
