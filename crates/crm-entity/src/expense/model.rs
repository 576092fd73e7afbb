//! Expense entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project expense (materials, subcontractors, tools, fuel, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    /// Unique expense identifier.
    pub id: i64,
    /// The project this expense belongs to.
    pub project_id: i64,
    /// Amount spent.
    pub amount: f64,
    /// What the money was spent on.
    pub description: String,
    /// Expense category.
    pub category: Option<String>,
    /// When the expense was recorded.
    pub date: DateTime<Utc>,
}

/// Data required to record a new expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpense {
    /// The project this expense belongs to.
    pub project_id: i64,
    /// Amount spent.
    pub amount: f64,
    /// What the money was spent on.
    pub description: String,
    /// Expense category.
    pub category: Option<String>,
}
