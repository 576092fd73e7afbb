//! Folder tree operations: listing, creation, renames, recursive delete.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_core::traits::blob::BlobStore;
use crm_entity::attachment::model::{Attachment, extension_of};
use crm_entity::attachment::store::AttachmentStore;
use crm_entity::folder::model::{CreateFolder, Folder};
use crm_entity::folder::store::FolderStore;

/// The direct contents of one tree level: sub-folders and files, each
/// newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListing {
    /// Immediate sub-folders.
    pub folders: Vec<Folder>,
    /// Files at this level.
    pub files: Vec<Attachment>,
}

/// Outcome of a delete that finished but may have left physical blobs
/// behind.
///
/// Metadata deletion is authoritative; blob deletion is best-effort. A
/// report with `blob_failures > 0` means the tree is gone from the
/// database but some disk files need a manual sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    /// Folder rows removed.
    pub folders_deleted: u64,
    /// Attachment rows removed.
    pub files_deleted: u64,
    /// Blobs whose deletion failed after their metadata row was removed.
    pub blob_failures: u64,
}

impl DeleteReport {
    /// True when the delete completed but left orphaned blobs behind.
    pub fn is_degraded(&self) -> bool {
        self.blob_failures > 0
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: DeleteReport) {
        self.folders_deleted += other.folders_deleted;
        self.files_deleted += other.files_deleted;
        self.blob_failures += other.blob_failures;
    }
}

/// Service owning the folder tree of each project.
#[derive(Debug, Clone)]
pub struct HierarchyService {
    folders: Arc<dyn FolderStore>,
    attachments: Arc<dyn AttachmentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl HierarchyService {
    /// Create a new hierarchy service over the given stores.
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

    /// List the direct contents of a folder, or of the project root when
    /// `folder_id` is `None`.
    pub async fn list_contents(
        &self,
        project_id: i64,
        folder_id: Option<i64>,
    ) -> AppResult<FolderListing> {
        if let Some(id) = folder_id {
            let folder = self
                .folders
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
            if folder.project_id != project_id {
                return Err(AppError::invalid_reference(format!(
                    "Folder {id} belongs to a different project"
                )));
            }
        }

        let folders = self.folders.find_children(project_id, folder_id).await?;
        let files = self
            .attachments
            .find_by_project_and_folder(project_id, folder_id)
            .await?;
        Ok(FolderListing { folders, files })
    }

    /// Create a folder under the given parent (or at project root).
    ///
    /// The parent, when given, must exist and belong to the same project;
    /// both checks run before anything is written. Duplicate sibling
    /// names are allowed.
    pub async fn create_folder(
        &self,
        project_id: i64,
        name: &str,
        parent_id: Option<i64>,
    ) -> AppResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }

        if let Some(pid) = parent_id {
            let parent = self.folders.find_by_id(pid).await?.ok_or_else(|| {
                AppError::invalid_reference(format!("Parent folder {pid} does not exist"))
            })?;
            if parent.project_id != project_id {
                return Err(AppError::invalid_reference(format!(
                    "Parent folder {pid} belongs to a different project"
                )));
            }
        }

        self.folders
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id,
                project_id,
            })
            .await
    }

    /// Rename a folder. Contents are untouched.
    pub async fn rename_folder(&self, id: i64, new_name: &str) -> AppResult<Folder> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }
        self.folders.rename(id, new_name).await
    }

    /// Rename an attachment's display name, preserving its extension.
    ///
    /// When the new name carries no extension, the extension of the
    /// current display name (falling back to the on-disk key) is
    /// re-attached, so `photo.jpg` renamed to `vacation` becomes
    /// `vacation.jpg`. The on-disk key never changes.
    pub async fn rename_attachment(&self, id: i64, new_name: &str) -> AppResult<Attachment> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }

        let current = self
            .attachments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attachment {id} not found")))?;

        let final_name = if extension_of(new_name).is_some() {
            new_name.to_string()
        } else {
            match current.display_extension().or(current.disk_extension()) {
                Some(ext) => format!("{new_name}.{ext}"),
                None => new_name.to_string(),
            }
        };

        self.attachments.rename(id, &final_name).await
    }

    /// Delete a folder and everything beneath it.
    ///
    /// `NotFound` if the folder does not exist — a second invocation on
    /// an already-deleted id reports that and changes nothing.
    ///
    /// Traversal is post-order over an explicit stack: on first visit a
    /// folder's own files are removed (metadata row first, then the blob,
    /// best-effort), then its children are pushed; on second visit the
    /// now-empty folder row is removed. Every step re-queries current
    /// state, so a run interrupted midway leaves a smaller but fully
    /// consistent tree and can simply be retried.
    pub async fn delete_folder_recursive(&self, folder_id: i64) -> AppResult<DeleteReport> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let mut report = DeleteReport::default();
        let mut stack: Vec<(i64, bool)> = vec![(folder_id, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                if self.folders.delete(id).await? {
                    report.folders_deleted += 1;
                }
                continue;
            }

            for file in self.attachments.find_by_folder(id).await? {
                if self.attachments.delete(file.id).await? {
                    report.files_deleted += 1;
                    if let Err(e) = self.blobs.delete(&file.filename).await {
                        warn!(
                            attachment_id = file.id,
                            key = %file.filename,
                            error = %e,
                            "Blob delete failed, metadata row already removed"
                        );
                        report.blob_failures += 1;
                    }
                }
            }

            stack.push((id, true));
            for child in self.folders.find_children_of(id).await? {
                stack.push((child.id, false));
            }
        }

        debug!(
            folder_id,
            folders = report.folders_deleted,
            files = report.files_deleted,
            blob_failures = report.blob_failures,
            "Recursive folder delete finished"
        );
        Ok(report)
    }
}
