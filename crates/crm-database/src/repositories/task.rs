//! Task repository implementation.

use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::task::model::{CreateTask, Task};

/// Repository for task rows.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a task.
    pub async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (description, priority, project_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.description)
        .bind(data.priority)
        .bind(data.project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Project {:?} does not exist", data.project_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create task", e),
        })
    }

    /// All tasks, open ones first, newest within each group.
    pub async fn find_all(&self) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks ORDER BY is_done ASC, created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }

    /// Flip a task's done flag.
    pub async fn toggle_done(&self, id: i64) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET is_done = NOT is_done WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to toggle task", e))?
        .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))
    }

    /// Delete a task.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete task", e))?;
        Ok(result.rows_affected() > 0)
    }
}
