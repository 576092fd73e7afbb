//! Project repository implementation.

use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::project::model::{CreateProject, Project, UpdateProject};

/// Repository for project CRUD.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// List all projects, grouped the way the project board shows them.
    pub async fn find_all(&self) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects ORDER BY district ASC NULLS LAST, location ASC, client_name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    /// Create a new project.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects \
             (client_name, description, location, street, building_number, district, \
              total_price, phone_number, email, vat_percentage) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 17.0)) RETURNING *",
        )
        .bind(&data.client_name)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.street)
        .bind(&data.building_number)
        .bind(&data.district)
        .bind(data.total_price)
        .bind(&data.phone_number)
        .bind(&data.email)
        .bind(data.vat_percentage)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    /// Apply a partial update; unset fields keep their current value.
    pub async fn update(&self, id: i64, attrs: &UpdateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET \
             client_name = COALESCE($2, client_name), \
             description = COALESCE($3, description), \
             status = COALESCE($4, status), \
             location = COALESCE($5, location), \
             street = COALESCE($6, street), \
             building_number = COALESCE($7, building_number), \
             district = COALESCE($8, district), \
             total_price = COALESCE($9, total_price), \
             phone_number = COALESCE($10, phone_number), \
             email = COALESCE($11, email), \
             is_archived = COALESCE($12, is_archived), \
             vat_percentage = COALESCE($13, vat_percentage), \
             proposal_text = COALESCE($14, proposal_text), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&attrs.client_name)
        .bind(&attrs.description)
        .bind(attrs.status)
        .bind(&attrs.location)
        .bind(&attrs.street)
        .bind(&attrs.building_number)
        .bind(&attrs.district)
        .bind(attrs.total_price)
        .bind(&attrs.phone_number)
        .bind(&attrs.email)
        .bind(attrs.is_archived)
        .bind(attrs.vat_percentage)
        .bind(&attrs.proposal_text)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update project", e))?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Delete a project. The database cascades to payments, expenses,
    /// folders, and attachment rows; physical blobs are cleaned up by the
    /// caller beforehand.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
