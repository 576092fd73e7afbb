//! Expense repository implementation.

use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::expense::model::{CreateExpense, Expense};

/// Repository for expense rows.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    /// Create a new expense repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a new expense.
    pub async fn create(&self, data: &CreateExpense) -> AppResult<Expense> {
        sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses (project_id, amount, description, category) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.amount)
        .bind(&data.description)
        .bind(&data.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Project {} does not exist", data.project_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create expense", e),
        })
    }

    /// Find an expense by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find expense", e))
    }

    /// List expenses for a project, newest first.
    pub async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE project_id = $1 ORDER BY date DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list expenses", e))
    }

    /// Delete an expense.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expense", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
