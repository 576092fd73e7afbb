//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_entity::business_expense::model::ExpenseCategory;

/// Body for creating a folder inside a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder (absent for project root).
    pub parent_id: Option<i64>,
}

/// Body for renaming a folder or a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRequest {
    /// The new name.
    pub name: String,
}

/// Body for recording a payment against a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// Amount received.
    pub amount: f64,
    /// Free-text note.
    pub note: Option<String>,
}

/// Body for recording an expense against a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Amount spent.
    pub amount: f64,
    /// What the money was spent on.
    pub description: String,
    /// Expense category.
    pub category: Option<String>,
}

/// Body for adding income to the tax tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaxPaymentRequest {
    /// Amount received.
    pub amount: f64,
}

/// Body for changing the tax percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTaxPercentageRequest {
    /// New VAT percentage.
    pub percentage: f64,
}

/// Body for recording a site visit against a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisitRequest {
    /// What happened, or what the visit is for.
    pub description: String,
    /// Follow-up actions agreed during the visit.
    pub next_actions: Option<String>,
    /// When the visit takes place; absent means now.
    pub visit_date: Option<DateTime<Utc>>,
}

/// Query parameters for filtering business expenses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessExpenseQuery {
    /// Restrict to one calendar year.
    pub year: Option<i32>,
    /// Restrict to one month of `year`.
    pub month: Option<u32>,
    /// Restrict to one category.
    pub category: Option<ExpenseCategory>,
}

/// Query parameters for the rolling finance breakdown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreakdownQuery {
    /// How many months back to report; defaults to 6.
    pub months: Option<u32>,
}

/// Query parameters for a single-month finance summary.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlySummaryQuery {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
}

/// Query parameters for listing a folder's contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListContentsQuery {
    /// The folder to list; absent means project root.
    pub folder_id: Option<i64>,
}

/// Query parameters for a bulk download selection.
///
/// `files` and `folders` are comma-separated id lists, e.g.
/// `?files=1,2&folders=10`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadQuery {
    /// Loose file ids.
    pub files: Option<String>,
    /// Folder subtree ids.
    pub folders: Option<String>,
}

impl DownloadQuery {
    /// Parse both id lists, rejecting anything that is not an integer.
    pub fn parse_ids(&self) -> Result<(Vec<i64>, Vec<i64>), String> {
        Ok((
            parse_id_list(self.files.as_deref())?,
            parse_id_list(self.folders.as_deref())?,
        ))
    }
}

fn parse_id_list(raw: Option<&str>) -> Result<Vec<i64>, String> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().map_err(|_| format!("Invalid id: {s}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        let query = DownloadQuery {
            files: Some("1, 2,3".into()),
            folders: Some("10".into()),
        };
        let (files, folders) = query.parse_ids().unwrap();
        assert_eq!(files, vec![1, 2, 3]);
        assert_eq!(folders, vec![10]);
    }

    #[test]
    fn absent_and_empty_lists_are_empty() {
        let query = DownloadQuery {
            files: None,
            folders: Some("".into()),
        };
        let (files, folders) = query.parse_ids().unwrap();
        assert!(files.is_empty());
        assert!(folders.is_empty());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let query = DownloadQuery {
            files: Some("1,x".into()),
            folders: None,
        };
        assert!(query.parse_ids().is_err());
    }
}
