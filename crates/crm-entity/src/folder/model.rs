//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A folder in a project's attachment tree.
///
/// Folders form a forest per project: `parent_id = None` means the folder
/// sits at project root. Cycles are impossible by construction — a parent
/// must exist before a child can reference it, and ids are monotonic.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: i64,
    /// Folder name. Sibling names are not required to be unique.
    pub name: String,
    /// Parent folder ID (None for root folders).
    pub parent_id: Option<i64>,
    /// The project owning this folder.
    pub project_id: i64,
    /// When the folder was created. Listings order newest-first.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for project root).
    pub parent_id: Option<i64>,
    /// The owning project.
    pub project_id: i64,
}
