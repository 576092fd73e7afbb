//! Attachment handlers: listing, upload, rename, delete, downloads.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use crm_core::error::AppError;
use crm_entity::attachment::model::Attachment;
use crm_service::{DeleteReport, DownloadPayload, FolderListing};

use crate::dto::{ApiResponse, DownloadQuery, ListContentsQuery, RenameRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/projects/{id}/attachments?folder_id=
pub async fn list_contents(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Query(query): Query<ListContentsQuery>,
) -> Result<Json<ApiResponse<FolderListing>>, ApiError> {
    let listing = state
        .hierarchy
        .list_contents(project_id, query.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}

/// POST /api/projects/{id}/attachments
///
/// Multipart upload: a `file` part with the contents, and an optional
/// `folder_id` part targeting a folder of the project.
pub async fn upload(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Attachment>>, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut folder_id: Option<i64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::validation("File part is missing a file name"))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file part: {e}")))?;
                file = Some((name, data));
            }
            Some("folder_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read folder_id: {e}")))?;
                folder_id = Some(
                    raw.trim()
                        .parse::<i64>()
                        .map_err(|_| AppError::validation(format!("Invalid folder_id: {raw}")))?,
                );
            }
            _ => {}
        }
    }

    let (name, data) = file.ok_or_else(|| AppError::validation("Missing file part"))?;
    let attachment = state
        .attachments
        .upload(project_id, folder_id, &name, data)
        .await?;
    Ok(Json(ApiResponse::ok(attachment)))
}

/// PATCH /api/attachments/{id}
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<RenameRequest>,
) -> Result<Json<ApiResponse<Attachment>>, ApiError> {
    let attachment = state.hierarchy.rename_attachment(id, &body.name).await?;
    Ok(Json(ApiResponse::ok(attachment)))
}

/// DELETE /api/attachments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteReport>>, ApiError> {
    let report = state.attachments.delete(id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/attachments/download?files=1,2&folders=10
///
/// A single file selection streams the raw blob under its display name;
/// anything else is assembled into `files.zip`.
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let (file_ids, folder_ids) = query
        .parse_ids()
        .map_err(AppError::validation)?;
    if file_ids.is_empty() && folder_ids.is_empty() {
        return Err(AppError::validation("Nothing selected for download").into());
    }

    let payload = state.archive.download_selection(&file_ids, &folder_ids).await?;

    let response = match payload {
        DownloadPayload::Single { attachment, stream } => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment.original_name),
            )
            .body(Body::from_stream(stream)),
        DownloadPayload::Archive { data } => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/zip")
            .header(
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"files.zip\"",
            )
            .header(header::CONTENT_LENGTH, data.len())
            .body(Body::from(data)),
    };

    response.map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// GET /api/attachments/{id}/download
///
/// Streams one attachment's blob under its display name.
pub async fn download_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let (attachment, stream) = state.attachments.download(id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment.original_name),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}
