//! Payment repository implementation.

use std::collections::HashMap;

use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::payment::model::{CreatePayment, Payment};

/// Repository for payment rows.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a new payment.
    pub async fn create(&self, data: &CreatePayment) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (project_id, amount, note) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.amount)
        .bind(&data.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Project {} does not exist", data.project_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create payment", e),
        })
    }

    /// Find a payment by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find payment", e))
    }

    /// List payments for a project, newest first.
    pub async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE project_id = $1 ORDER BY date DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list payments", e))
    }

    /// Total paid per project, for decorating project listings.
    pub async fn totals_by_project(&self) -> AppResult<HashMap<i64, f64>> {
        let rows = sqlx::query_as::<_, (i64, f64)>(
            "SELECT project_id, COALESCE(SUM(amount), 0) FROM payments GROUP BY project_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sum payments", e))?;
        Ok(rows.into_iter().collect())
    }

    /// Total received in a half-open date range, across all projects.
    pub async fn sum_in_range(
        &self,
        from: chrono::DateTime<chrono::Utc>,
        until: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<f64> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE date >= $1 AND date < $2",
        )
        .bind(from)
        .bind(until)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sum payments", e))
    }

    /// Delete a payment.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete payment", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
