//! Payment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A payment received against a project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: i64,
    /// The project this payment belongs to.
    pub project_id: i64,
    /// Amount received.
    pub amount: f64,
    /// Free-text note ("advance", "final payment", ...).
    pub note: Option<String>,
    /// When the payment was recorded.
    pub date: DateTime<Utc>,
}

/// Data required to record a new payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    /// The project this payment belongs to.
    pub project_id: i64,
    /// Amount received.
    pub amount: f64,
    /// Free-text note.
    pub note: Option<String>,
}
