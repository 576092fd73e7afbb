//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Blob storage configuration.
///
/// Uploaded file bytes live in a flat directory keyed by opaque
/// generated names; the relational store holds the user-facing names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded file blobs.
    #[serde(default = "default_uploads_root")]
    pub uploads_root: String,
    /// Maximum size of a single uploaded file in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_root: default_uploads_root(),
            max_upload_size_bytes: default_max_upload_size(),
        }
    }
}

fn default_uploads_root() -> String {
    "./data/uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    100 * 1024 * 1024
}
