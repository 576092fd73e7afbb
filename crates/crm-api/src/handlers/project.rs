//! Project CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};

use crm_entity::project::model::{CreateProject, Project, UpdateProject};
use crm_service::ProjectWithTotals;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProjectWithTotals>>>, ApiError> {
    let projects = state.projects.list().await?;
    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<CreateProject>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.projects.create(&body).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.projects.get(id).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// PATCH /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProject>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let project = state.projects.update(id, &body).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.projects.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
