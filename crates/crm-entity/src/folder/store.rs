//! Folder tree store contract.

use async_trait::async_trait;

use crm_core::result::AppResult;

use super::model::{CreateFolder, Folder};

/// Persistence contract for folder tree nodes.
///
/// The store manages single nodes only; recursive cascade is the
/// hierarchy service's job. Implemented by the PostgreSQL repository and
/// by the in-memory store in `crm-database`.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a new folder.
    ///
    /// Fails with a `NotFound` error if `parent_id` references a folder
    /// that does not exist. Callers are responsible for validating
    /// ownership (`project_id` match) before calling.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Find a folder by ID.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>>;

    /// List the immediate children of a folder within a project, or the
    /// project's root folders when `parent_id` is `None`.
    ///
    /// Ordered by creation time descending, newest first, with id as a
    /// deterministic tie-break.
    async fn find_children(
        &self,
        project_id: i64,
        parent_id: Option<i64>,
    ) -> AppResult<Vec<Folder>>;

    /// List the immediate children of a folder regardless of project.
    ///
    /// Used by tree traversal, which already holds a verified node and
    /// only needs to expand it.
    async fn find_children_of(&self, folder_id: i64) -> AppResult<Vec<Folder>>;

    /// Rename a folder. Fails with `NotFound` if the folder is missing.
    async fn rename(&self, id: i64, name: &str) -> AppResult<Folder>;

    /// Delete a single folder row. Returns `true` if a row was deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
