//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work has not started yet.
    PreWork,
    /// A price proposal was sent to the client.
    ProposalSent,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

/// A client project.
///
/// The CRM is single-user; the client's contact details live directly on
/// the project row rather than in a separate clients table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: i64,
    /// Client display name.
    pub client_name: String,
    /// Free-text description of the work.
    pub description: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// City or site name.
    pub location: String,
    /// Street name.
    pub street: Option<String>,
    /// Building number (kept as text: "10B", "3/4").
    pub building_number: Option<String>,
    /// District used for grouping in listings.
    pub district: Option<String>,
    /// Agreed price excluding VAT.
    pub total_price: f64,
    /// Client phone number.
    pub phone_number: Option<String>,
    /// Client email address.
    pub email: Option<String>,
    /// Whether the project is archived (hidden from the board).
    pub is_archived: bool,
    /// VAT percentage applied to the price.
    pub vat_percentage: f64,
    /// Saved proposal text, if a proposal was generated.
    pub proposal_text: Option<String>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// VAT amount for the agreed price.
    pub fn vat_amount(&self) -> f64 {
        self.total_price * (self.vat_percentage / 100.0)
    }

    /// Agreed price including VAT.
    pub fn total_with_vat(&self) -> f64 {
        self.total_price + self.vat_amount()
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Client display name.
    pub client_name: String,
    /// Free-text description of the work.
    pub description: String,
    /// City or site name.
    pub location: String,
    /// Street name.
    pub street: Option<String>,
    /// Building number.
    pub building_number: Option<String>,
    /// District used for grouping.
    pub district: Option<String>,
    /// Agreed price excluding VAT.
    #[serde(default)]
    pub total_price: f64,
    /// Client phone number.
    pub phone_number: Option<String>,
    /// Client email address.
    pub email: Option<String>,
    /// VAT percentage (defaults to 17%).
    pub vat_percentage: Option<f64>,
}

/// Partial update for an existing project. `None` fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New client name.
    pub client_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<ProjectStatus>,
    /// New location.
    pub location: Option<String>,
    /// New street.
    pub street: Option<String>,
    /// New building number.
    pub building_number: Option<String>,
    /// New district.
    pub district: Option<String>,
    /// New price excluding VAT.
    pub total_price: Option<f64>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// Archive / unarchive.
    pub is_archived: Option<bool>,
    /// New VAT percentage.
    pub vat_percentage: Option<f64>,
    /// New proposal text.
    pub proposal_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(total_price: f64, vat: f64) -> Project {
        Project {
            id: 1,
            client_name: "Cohen".into(),
            description: "Roof repair".into(),
            status: ProjectStatus::InProgress,
            location: "Haifa".into(),
            street: None,
            building_number: None,
            district: None,
            total_price,
            phone_number: None,
            email: None,
            is_archived: false,
            vat_percentage: vat,
            proposal_text: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn vat_math() {
        let p = project(1000.0, 17.0);
        assert!((p.vat_amount() - 170.0).abs() < f64::EPSILON);
        assert!((p.total_with_vat() - 1170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_price_has_zero_vat() {
        let p = project(0.0, 17.0);
        assert_eq!(p.vat_amount(), 0.0);
        assert_eq!(p.total_with_vat(), 0.0);
    }
}
