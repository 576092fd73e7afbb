//! In-memory attachment store using a tokio mutex.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_entity::attachment::model::{Attachment, CreateAttachment};
use crm_entity::attachment::store::AttachmentStore;

/// Internal state for the memory attachment store.
#[derive(Debug, Default)]
struct InnerState {
    /// Attachment rows keyed by id.
    rows: BTreeMap<i64, Attachment>,
    /// Monotonic id sequence.
    next_id: i64,
}

/// In-memory attachment store.
///
/// Suitable for tests and single-node tooling only.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttachmentStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryAttachmentStore {
    /// Creates an empty memory attachment store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attachments currently stored.
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    /// True if no attachments are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshot of every stored row, for invariant checks in tests.
    pub async fn all(&self) -> Vec<Attachment> {
        self.state.lock().await.rows.values().cloned().collect()
    }
}

fn sort_newest_first(attachments: &mut [Attachment]) {
    attachments.sort_by(|a, b| {
        b.upload_date
            .cmp(&a.upload_date)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn create(&self, data: &CreateAttachment) -> AppResult<Attachment> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let attachment = Attachment {
            id: state.next_id,
            filename: data.filename.clone(),
            original_name: data.original_name.clone(),
            project_id: data.project_id,
            folder_id: data.folder_id,
            upload_date: Utc::now(),
        };
        state.rows.insert(attachment.id, attachment.clone());
        Ok(attachment)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Attachment>> {
        Ok(self.state.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_project_and_folder(
        &self,
        project_id: i64,
        folder_id: Option<i64>,
    ) -> AppResult<Vec<Attachment>> {
        let state = self.state.lock().await;
        let mut files: Vec<Attachment> = state
            .rows
            .values()
            .filter(|a| a.project_id == project_id && a.folder_id == folder_id)
            .cloned()
            .collect();
        sort_newest_first(&mut files);
        Ok(files)
    }

    async fn find_by_folder(&self, folder_id: i64) -> AppResult<Vec<Attachment>> {
        let state = self.state.lock().await;
        let mut files: Vec<Attachment> = state
            .rows
            .values()
            .filter(|a| a.folder_id == Some(folder_id))
            .cloned()
            .collect();
        sort_newest_first(&mut files);
        Ok(files)
    }

    async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<Attachment>> {
        let state = self.state.lock().await;
        let mut files: Vec<Attachment> = state
            .rows
            .values()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect();
        sort_newest_first(&mut files);
        Ok(files)
    }

    async fn rename(&self, id: i64, original_name: &str) -> AppResult<Attachment> {
        let mut state = self.state.lock().await;
        let attachment = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Attachment {id} not found")))?;
        attachment.original_name = original_name.to_string();
        Ok(attachment.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.state.lock().await.rows.remove(&id).is_some())
    }
}
