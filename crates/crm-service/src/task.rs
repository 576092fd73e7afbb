//! Standalone to-do tasks.

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_database::repositories::TaskRepository;
use crm_entity::task::model::{CreateTask, Task};

/// Task operations, company-wide rather than per project.
#[derive(Debug, Clone)]
pub struct TaskService {
    tasks: TaskRepository,
}

impl TaskService {
    /// Create a new task service.
    pub fn new(tasks: TaskRepository) -> Self {
        Self { tasks }
    }

    /// Create a task.
    pub async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        if data.description.trim().is_empty() {
            return Err(AppError::validation("Task description must not be empty"));
        }
        self.tasks.create(data).await
    }

    /// All tasks, open ones first, newest within each group.
    pub async fn list(&self) -> AppResult<Vec<Task>> {
        self.tasks.find_all().await
    }

    /// Flip a task between open and done.
    pub async fn toggle_done(&self, id: i64) -> AppResult<Task> {
        self.tasks.toggle_done(id).await
    }

    /// Delete a task.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.tasks.delete(id).await? {
            return Err(AppError::not_found(format!("Task {id} not found")));
        }
        Ok(())
    }
}
