//! Blob store trait for physical file byte storage.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for physical file byte storage.
///
/// Keys are opaque, collision-resistant generated names; physical path
/// resolution is the implementation's concern. The relational store is
/// the source of truth for user-facing names — a blob with no metadata
/// row is garbage, a metadata row with no blob is a degraded (logged,
/// skipped) condition, never a hard failure.
///
/// The [`BlobStore`] trait is defined here in `crm-core` and implemented
/// in `crm-storage` (local filesystem and in-memory).
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Write the full contents of a blob under the given key.
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Check whether a blob exists for the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Delete the blob for the given key. Deleting a missing key is not
    /// an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Read a blob into memory as a complete byte vector.
    ///
    /// Returns a `NotFound` error if no blob exists for the key.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Open a blob as a byte stream.
    ///
    /// Returns a `NotFound` error if no blob exists for the key.
    async fn open_read(&self, key: &str) -> AppResult<ByteStream>;
}
