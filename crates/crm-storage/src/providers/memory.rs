//! In-memory blob store for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_core::traits::blob::{BlobStore, ByteStream};

/// In-memory blob store backed by a map of key to bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MemoryBlobStore {
    /// Creates an empty memory blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently stored.
    pub async fn len(&self) -> usize {
        self.blobs.lock().await.len()
    }

    /// True if no blobs are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove a blob out-of-band, simulating a rotted physical file.
    pub async fn corrupt(&self, key: &str) {
        self.blobs.lock().await.remove(key);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.blobs.lock().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.lock().await.contains_key(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.blobs.lock().await.remove(key);
        Ok(())
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.blobs
            .lock()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {key}")))
    }

    async fn open_read(&self, key: &str) -> AppResult<ByteStream> {
        let data = self.read_bytes(key).await?;
        Ok(Box::pin(futures::stream::once(async move { Ok(data) })))
    }
}
