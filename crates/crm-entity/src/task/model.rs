//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A standalone to-do item, optionally tied to a project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique task identifier.
    pub id: i64,
    /// What needs doing.
    pub description: String,
    /// Urgency.
    pub priority: TaskPriority,
    /// Whether the task is done.
    pub is_done: bool,
    /// The related project, if any. Cleared (not cascaded) when the
    /// project is deleted.
    pub project_id: Option<i64>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// What needs doing.
    pub description: String,
    /// Urgency; defaults to medium.
    #[serde(default)]
    pub priority: TaskPriority,
    /// The related project, if any.
    pub project_id: Option<i64>,
}
