//! Site visit handlers.

use axum::Json;
use axum::extract::{Path, State};

use crm_entity::visit::model::{CreateVisit, Visit};

use crate::dto::{ApiResponse, CreateVisitRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/projects/{id}/visits
pub async fn list_visits(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Visit>>>, ApiError> {
    let visits = state.visits.list_by_project(project_id).await?;
    Ok(Json(ApiResponse::ok(visits)))
}

/// POST /api/projects/{id}/visits
pub async fn create_visit(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(body): Json<CreateVisitRequest>,
) -> Result<Json<ApiResponse<Visit>>, ApiError> {
    let visit = state
        .visits
        .create(&CreateVisit {
            project_id,
            description: body.description,
            next_actions: body.next_actions,
            visit_date: body.visit_date,
        })
        .await?;
    Ok(Json(ApiResponse::ok(visit)))
}

/// GET /api/visits/upcoming
pub async fn upcoming_visits(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Visit>>>, ApiError> {
    let visits = state.visits.upcoming().await?;
    Ok(Json(ApiResponse::ok(visits)))
}

/// DELETE /api/visits/{id}
pub async fn delete_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.visits.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
