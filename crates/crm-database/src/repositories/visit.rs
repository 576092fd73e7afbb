//! Site visit repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::visit::model::{CreateVisit, Visit};

/// Repository for visit rows.
#[derive(Debug, Clone)]
pub struct VisitRepository {
    pool: PgPool,
}

impl VisitRepository {
    /// Create a new visit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a visit; an absent date means now.
    pub async fn create(&self, data: &CreateVisit) -> AppResult<Visit> {
        sqlx::query_as::<_, Visit>(
            "INSERT INTO visits (project_id, description, next_actions, visit_date) \
             VALUES ($1, $2, $3, COALESCE($4, NOW())) RETURNING *",
        )
        .bind(data.project_id)
        .bind(&data.description)
        .bind(&data.next_actions)
        .bind(data.visit_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Project {} does not exist", data.project_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create visit", e),
        })
    }

    /// A project's visits, most recent first.
    pub async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<Visit>> {
        sqlx::query_as::<_, Visit>(
            "SELECT * FROM visits WHERE project_id = $1 ORDER BY visit_date DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list visits", e))
    }

    /// Visits on or after the given instant, soonest first.
    pub async fn find_upcoming(&self, since: DateTime<Utc>) -> AppResult<Vec<Visit>> {
        sqlx::query_as::<_, Visit>(
            "SELECT * FROM visits WHERE visit_date >= $1 ORDER BY visit_date ASC, id ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list upcoming visits", e))
    }

    /// Delete a visit.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM visits WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete visit", e))?;
        Ok(result.rows_affected() > 0)
    }
}
