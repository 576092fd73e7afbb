//! Site visit tracking.

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_database::repositories::VisitRepository;
use crm_entity::visit::model::{CreateVisit, Visit};

use crate::period;

/// Visit operations for a project.
#[derive(Debug, Clone)]
pub struct VisitService {
    visits: VisitRepository,
}

impl VisitService {
    /// Create a new visit service.
    pub fn new(visits: VisitRepository) -> Self {
        Self { visits }
    }

    /// Record a visit against a project.
    pub async fn create(&self, data: &CreateVisit) -> AppResult<Visit> {
        if data.description.trim().is_empty() {
            return Err(AppError::validation("Visit description must not be empty"));
        }
        self.visits.create(data).await
    }

    /// A project's visits, most recent first.
    pub async fn list_by_project(&self, project_id: i64) -> AppResult<Vec<Visit>> {
        self.visits.find_by_project(project_id).await
    }

    /// Visits from the start of today onwards, soonest first.
    pub async fn upcoming(&self) -> AppResult<Vec<Visit>> {
        self.visits.find_upcoming(period::start_of_today()).await
    }

    /// Delete a visit.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.visits.delete(id).await? {
            return Err(AppError::not_found(format!("Visit {id} not found")));
        }
        Ok(())
    }
}
