//! In-memory folder store using a tokio mutex.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_entity::folder::model::{CreateFolder, Folder};
use crm_entity::folder::store::FolderStore;

/// Internal state for the memory folder store.
#[derive(Debug, Default)]
struct InnerState {
    /// Folder rows keyed by id.
    rows: BTreeMap<i64, Folder>,
    /// Monotonic id sequence.
    next_id: i64,
}

/// In-memory folder store.
///
/// Suitable for tests and single-node tooling only.
#[derive(Debug, Clone, Default)]
pub struct MemoryFolderStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryFolderStore {
    /// Creates an empty memory folder store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of folders currently stored.
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    /// True if no folders are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn sort_newest_first(folders: &mut [Folder]) {
    folders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut state = self.state.lock().await;

        if let Some(parent_id) = data.parent_id {
            if !state.rows.contains_key(&parent_id) {
                return Err(AppError::not_found(format!(
                    "Parent folder {parent_id} does not exist"
                )));
            }
        }

        state.next_id += 1;
        let folder = Folder {
            id: state.next_id,
            name: data.name.clone(),
            parent_id: data.parent_id,
            project_id: data.project_id,
            created_at: Utc::now(),
        };
        state.rows.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        Ok(self.state.lock().await.rows.get(&id).cloned())
    }

    async fn find_children(
        &self,
        project_id: i64,
        parent_id: Option<i64>,
    ) -> AppResult<Vec<Folder>> {
        let state = self.state.lock().await;
        let mut children: Vec<Folder> = state
            .rows
            .values()
            .filter(|f| f.project_id == project_id && f.parent_id == parent_id)
            .cloned()
            .collect();
        sort_newest_first(&mut children);
        Ok(children)
    }

    async fn find_children_of(&self, folder_id: i64) -> AppResult<Vec<Folder>> {
        let state = self.state.lock().await;
        let mut children: Vec<Folder> = state
            .rows
            .values()
            .filter(|f| f.parent_id == Some(folder_id))
            .cloned()
            .collect();
        sort_newest_first(&mut children);
        Ok(children)
    }

    async fn rename(&self, id: i64, name: &str) -> AppResult<Folder> {
        let mut state = self.state.lock().await;
        let folder = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = name.to_string();
        Ok(folder.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.state.lock().await.rows.remove(&id).is_some())
    }
}
