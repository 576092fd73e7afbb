//! Task handlers.

use axum::Json;
use axum::extract::{Path, State};

use crm_entity::task::model::{CreateTask, Task};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError> {
    let tasks = state.tasks.list().await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTask>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.tasks.create(&body).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// PATCH /api/tasks/{id}/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = state.tasks.toggle_done(id).await?;
    Ok(Json(ApiResponse::ok(task)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.tasks.delete(id).await?;
    Ok(Json(ApiResponse::ok(())))
}
