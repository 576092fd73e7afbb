//! Attachment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::attachment::model::{Attachment, CreateAttachment};
use crm_entity::attachment::store::AttachmentStore;

/// PostgreSQL-backed attachment store.
#[derive(Debug, Clone)]
pub struct AttachmentRepository {
    pool: PgPool,
}

impl AttachmentRepository {
    /// Create a new attachment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentStore for AttachmentRepository {
    async fn create(&self, data: &CreateAttachment) -> AppResult<Attachment> {
        sqlx::query_as::<_, Attachment>(
            "INSERT INTO attachments (filename, original_name, project_id, folder_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.filename)
        .bind(&data.original_name)
        .bind(data.project_id)
        .bind(data.folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Folder {:?} does not exist", data.folder_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create attachment", e),
        })
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Attachment>> {
        sqlx::query_as::<_, Attachment>("SELECT * FROM attachments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find attachment", e))
    }

    async fn find_by_project_and_folder(
        &self,
        project_id: i64,
        folder_id: Option<i64>,
    ) -> AppResult<Vec<Attachment>> {
        sqlx::query_as::<_, Attachment>(
            "SELECT * FROM attachments \
             WHERE project_id = $1 AND folder_id IS NOT DISTINCT FROM $2 \
             ORDER BY upload_date DESC, id DESC",
        )
        .bind(project_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attachments", e))
    }

    async fn find_by_folder(&self, folder_id: i64) -> AppResult<Vec<Attachment>> {
        sqlx::query_as::<_, Attachment>(
            "SELECT * FROM attachments WHERE folder_id = $1 ORDER BY upload_date DESC, id DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attachments", e))
    }

    async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<Attachment>> {
        sqlx::query_as::<_, Attachment>(
            "SELECT * FROM attachments WHERE project_id = $1 ORDER BY upload_date DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attachments", e))
    }

    async fn rename(&self, id: i64, original_name: &str) -> AppResult<Attachment> {
        sqlx::query_as::<_, Attachment>(
            "UPDATE attachments SET original_name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(original_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename attachment", e))?
        .ok_or_else(|| AppError::not_found(format!("Attachment {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete attachment", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
