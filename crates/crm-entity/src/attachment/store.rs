//! Attachment store contract.

use async_trait::async_trait;

use crm_core::result::AppResult;

use super::model::{Attachment, CreateAttachment};

/// Persistence contract for attachment metadata rows.
///
/// `delete` removes the metadata row only — it never touches the blob
/// store. Blob cleanup is the hierarchy service's responsibility, so that
/// metadata deletion is guaranteed even when blob cleanup fails.
#[async_trait]
pub trait AttachmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a new attachment record.
    async fn create(&self, data: &CreateAttachment) -> AppResult<Attachment>;

    /// Find an attachment by ID.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Attachment>>;

    /// List the files directly inside a folder of a project, or at
    /// project root when `folder_id` is `None`.
    ///
    /// Ordered by upload time descending, newest first, with id as a
    /// deterministic tie-break.
    async fn find_by_project_and_folder(
        &self,
        project_id: i64,
        folder_id: Option<i64>,
    ) -> AppResult<Vec<Attachment>>;

    /// List the files directly inside a folder regardless of project.
    async fn find_by_folder(&self, folder_id: i64) -> AppResult<Vec<Attachment>>;

    /// List every file of a project, across all folders.
    ///
    /// Used when a project is deleted to sweep its physical blobs before
    /// the database cascade removes the metadata rows.
    async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<Attachment>>;

    /// Update the display name. Fails with `NotFound` if missing.
    async fn rename(&self, id: i64, original_name: &str) -> AppResult<Attachment>;

    /// Delete the metadata row. Returns `true` if a row was deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
