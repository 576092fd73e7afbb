//! Attachment (file) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A file attached to a project.
///
/// The opaque on-disk blob key (`filename`) is separate from the
/// user-facing display name (`original_name`); renames only ever touch
/// the latter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    /// Unique attachment identifier.
    pub id: i64,
    /// Opaque on-disk blob key (e.g. `7f3a…c1.jpg`).
    pub filename: String,
    /// User-facing display name (e.g. `photo.jpg`).
    pub original_name: String,
    /// The project owning this file.
    pub project_id: i64,
    /// The folder containing this file (None for project root).
    pub folder_id: Option<i64>,
    /// When the file was uploaded. Listings order newest-first.
    pub upload_date: DateTime<Utc>,
}

impl Attachment {
    /// The extension of the display name (without the dot), if any.
    pub fn display_extension(&self) -> Option<&str> {
        extension_of(&self.original_name)
    }

    /// The extension of the on-disk blob key, if any.
    pub fn disk_extension(&self) -> Option<&str> {
        extension_of(&self.filename)
    }
}

/// Extension of a file name (without the dot), if it has one.
pub fn extension_of(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Data required to create a new attachment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttachment {
    /// Opaque on-disk blob key.
    pub filename: String,
    /// User-facing display name.
    pub original_name: String,
    /// The owning project.
    pub project_id: i64,
    /// The containing folder (None for project root).
    pub folder_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_parsing() {
        assert_eq!(extension_of("photo.jpg"), Some("jpg"));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("vacation"), None);
        assert_eq!(extension_of(".hidden"), None);
        assert_eq!(extension_of("trailing."), None);
    }
}
