//! Site visit entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scheduled or completed visit to a project's site.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Visit {
    /// Unique visit identifier.
    pub id: i64,
    /// The project being visited.
    pub project_id: i64,
    /// What happened, or what the visit is for.
    pub description: String,
    /// Follow-up actions agreed during the visit.
    pub next_actions: Option<String>,
    /// When the visit takes (or took) place.
    pub visit_date: DateTime<Utc>,
}

/// Data required to record a visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisit {
    /// The project being visited.
    pub project_id: i64,
    /// What happened, or what the visit is for.
    pub description: String,
    /// Follow-up actions agreed during the visit.
    pub next_actions: Option<String>,
    /// When the visit takes place; absent means now.
    pub visit_date: Option<DateTime<Utc>>,
}
