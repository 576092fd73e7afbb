//! Folder tree handlers.

use axum::Json;
use axum::extract::{Path, State};

use crm_entity::folder::model::Folder;
use crm_service::DeleteReport;

use crate::dto::{ApiResponse, CreateFolderRequest, RenameRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/projects/{id}/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(body): Json<CreateFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state
        .hierarchy
        .create_folder(project_id, &body.name, body.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PATCH /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<RenameRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.hierarchy.rename_folder(id, &body.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
///
/// Recursively removes the folder, everything beneath it, and the
/// physical blobs. The report says how much was removed and whether any
/// blobs were left behind.
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteReport>>, ApiError> {
    let report = state.hierarchy.delete_folder_recursive(id).await?;
    Ok(Json(ApiResponse::ok(report)))
}
