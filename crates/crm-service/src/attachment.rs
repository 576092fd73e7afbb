//! File upload, download, and deletion.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_core::traits::blob::{BlobStore, ByteStream};
use crm_entity::attachment::model::{Attachment, CreateAttachment};
use crm_entity::attachment::store::AttachmentStore;
use crm_entity::folder::store::FolderStore;
use crm_storage::new_blob_key;

use crate::hierarchy::DeleteReport;

/// Handles single-file operations against the blob and metadata stores.
#[derive(Debug, Clone)]
pub struct AttachmentService {
    folders: Arc<dyn FolderStore>,
    attachments: Arc<dyn AttachmentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl AttachmentService {
    /// Create a new attachment service over the given stores.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        attachments: Arc<dyn AttachmentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            folders,
            attachments,
            blobs,
        }
    }

    /// Store an uploaded file and record its metadata.
    ///
    /// The target folder, when given, must exist and belong to the
    /// project. The blob is written under a fresh opaque key before the
    /// metadata row is created; if the row insert fails the blob is
    /// removed again.
    pub async fn upload(
        &self,
        project_id: i64,
        folder_id: Option<i64>,
        original_name: &str,
        data: Bytes,
    ) -> AppResult<Attachment> {
        let original_name = original_name.trim();
        if original_name.is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }

        if let Some(fid) = folder_id {
            let folder = self.folders.find_by_id(fid).await?.ok_or_else(|| {
                AppError::invalid_reference(format!("Folder {fid} does not exist"))
            })?;
            if folder.project_id != project_id {
                return Err(AppError::invalid_reference(format!(
                    "Folder {fid} belongs to a different project"
                )));
            }
        }

        let key = new_blob_key(original_name);
        self.blobs.write(&key, data).await?;

        let created = self
            .attachments
            .create(&CreateAttachment {
                filename: key.clone(),
                original_name: original_name.to_string(),
                project_id,
                folder_id,
            })
            .await;

        match created {
            Ok(attachment) => {
                info!(
                    attachment_id = attachment.id,
                    project_id,
                    folder_id,
                    name = %attachment.original_name,
                    "Stored upload"
                );
                Ok(attachment)
            }
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove blob of failed upload");
                }
                Err(e)
            }
        }
    }

    /// Open an attachment's blob for streaming.
    ///
    /// `NotFound` covers both a missing metadata row and a missing blob.
    pub async fn download(&self, id: i64) -> AppResult<(Attachment, ByteStream)> {
        let attachment = self
            .attachments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attachment {id} not found")))?;
        let stream = self.blobs.open_read(&attachment.filename).await?;
        Ok((attachment, stream))
    }

    /// Delete one attachment: metadata row first, then the blob.
    ///
    /// Blob removal is best-effort; a failure is reported, not raised.
    pub async fn delete(&self, id: i64) -> AppResult<DeleteReport> {
        let attachment = self
            .attachments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attachment {id} not found")))?;

        let mut report = DeleteReport::default();
        if self.attachments.delete(id).await? {
            report.files_deleted += 1;
            if let Err(e) = self.blobs.delete(&attachment.filename).await {
                warn!(
                    attachment_id = id,
                    key = %attachment.filename,
                    error = %e,
                    "Blob delete failed, metadata row already removed"
                );
                report.blob_failures += 1;
            }
        }
        Ok(report)
    }
}
