//! Project CRUD and board listing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_core::traits::blob::BlobStore;
use crm_database::repositories::{PaymentRepository, ProjectRepository};
use crm_entity::attachment::store::AttachmentStore;
use crm_entity::project::model::{CreateProject, Project, UpdateProject};

/// A project decorated with the sum of its recorded payments, as the
/// project board displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithTotals {
    /// The project itself.
    #[serde(flatten)]
    pub project: Project,
    /// Sum of payments recorded against the project.
    pub total_paid: f64,
}

/// Project lifecycle operations.
#[derive(Debug, Clone)]
pub struct ProjectService {
    projects: ProjectRepository,
    payments: PaymentRepository,
    attachments: Arc<dyn AttachmentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ProjectService {
    /// Create a new project service.
    pub fn new(
        projects: ProjectRepository,
        payments: PaymentRepository,
        attachments: Arc<dyn AttachmentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            projects,
            payments,
            attachments,
            blobs,
        }
    }

    /// List all projects with their payment totals.
    pub async fn list(&self) -> AppResult<Vec<ProjectWithTotals>> {
        let projects = self.projects.find_all().await?;
        let totals = self.payments.totals_by_project().await?;
        Ok(projects
            .into_iter()
            .map(|project| {
                let total_paid = totals.get(&project.id).copied().unwrap_or(0.0);
                ProjectWithTotals {
                    project,
                    total_paid,
                }
            })
            .collect())
    }

    /// Fetch a single project.
    pub async fn get(&self, id: i64) -> AppResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Create a new project.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        if data.client_name.trim().is_empty() {
            return Err(AppError::validation("Client name must not be empty"));
        }
        let project = self.projects.create(data).await?;
        info!(project_id = project.id, client = %project.client_name, "Created project");
        Ok(project)
    }

    /// Apply a partial update to a project.
    pub async fn update(&self, id: i64, attrs: &UpdateProject) -> AppResult<Project> {
        self.projects.update(id, attrs).await
    }

    /// Delete a project with everything attached to it.
    ///
    /// Physical blobs are swept first (best-effort); the database then
    /// cascades the row delete to payments, expenses, folders, and
    /// attachment metadata.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get(id).await?;

        for attachment in self.attachments.find_by_project(id).await? {
            if let Err(e) = self.blobs.delete(&attachment.filename).await {
                warn!(
                    attachment_id = attachment.id,
                    key = %attachment.filename,
                    error = %e,
                    "Blob delete failed during project delete"
                );
            }
        }

        if !self.projects.delete(id).await? {
            return Err(AppError::not_found(format!("Project {id} not found")));
        }
        info!(project_id = id, "Deleted project");
        Ok(())
    }
}
