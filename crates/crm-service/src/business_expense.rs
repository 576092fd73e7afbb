//! Company-wide expense tracking for tax deduction.
//!
//! Unlike per-project expenses, business expenses carry a tax-relevant
//! category, a deductible percentage, and optionally a scanned receipt
//! stored through the blob store.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::sync::Arc;

use bytes::Bytes;
use chrono::Datelike;
use serde::Serialize;
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_core::traits::blob::BlobStore;
use crm_database::repositories::BusinessExpenseRepository;
use crm_entity::business_expense::model::{
    BusinessExpense, CreateBusinessExpense, ExpenseCategory, UpdateBusinessExpense,
};
use crm_storage::new_blob_key;

use crate::period;

/// Filters for listing business expenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    /// Restrict to one calendar year.
    pub year: Option<i32>,
    /// Restrict to one month of `year`; requires `year`.
    pub month: Option<u32>,
    /// Restrict to one category.
    pub category: Option<ExpenseCategory>,
}

/// Year-level totals with category and month splits.
#[derive(Debug, Clone, Serialize)]
pub struct YearlyExpenseReport {
    /// The year reported on.
    pub year: i32,
    /// Sum of all expense amounts.
    pub total_expenses: f64,
    /// Sum of deductible shares.
    pub tax_deductible_expenses: f64,
    /// Totals per category.
    pub by_category: BTreeMap<ExpenseCategory, f64>,
    /// Totals per month (1-12).
    pub by_month: BTreeMap<u32, f64>,
    /// The underlying rows, newest first.
    pub expenses: Vec<BusinessExpense>,
}

/// One month's slice of a yearly breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyExpenseBreakdown {
    /// Month number, 1-12.
    pub month: u32,
    /// English month name.
    pub month_name: &'static str,
    /// Sum of all expense amounts in the month.
    pub total_amount: f64,
    /// Sum of deductible shares in the month.
    pub tax_deductible: f64,
    /// Number of expenses in the month.
    pub expense_count: usize,
}

/// Business expense operations: CRUD, receipts, and tax reports.
#[derive(Debug, Clone)]
pub struct BusinessExpenseService {
    expenses: BusinessExpenseRepository,
    blobs: Arc<dyn BlobStore>,
}

impl BusinessExpenseService {
    /// Create a new business expense service.
    pub fn new(expenses: BusinessExpenseRepository, blobs: Arc<dyn BlobStore>) -> Self {
        Self { expenses, blobs }
    }

    /// Record a business expense.
    pub async fn create(&self, data: &CreateBusinessExpense) -> AppResult<BusinessExpense> {
        if data.description.trim().is_empty() {
            return Err(AppError::validation("Expense description must not be empty"));
        }
        if data.amount <= 0.0 {
            return Err(AppError::validation("Expense amount must be positive"));
        }
        if let Some(pct) = data.tax_deductible_percentage {
            validate_percentage(pct)?;
        }
        self.expenses.create(data).await
    }

    /// List expenses matching the filter, newest first.
    pub async fn list(&self, filter: ExpenseFilter) -> AppResult<Vec<BusinessExpense>> {
        let range = match (filter.year, filter.month) {
            (Some(year), Some(month)) => Some(period::month_range(year, month)?),
            (Some(year), None) => Some(period::year_range(year)?),
            (None, Some(_)) => {
                return Err(AppError::validation("Month filter requires a year"));
            }
            (None, None) => None,
        };
        let (from, until) = match range {
            Some((from, until)) => (Some(from), Some(until)),
            None => (None, None),
        };
        self.expenses.find_filtered(from, until, filter.category).await
    }

    /// A project's business expenses, newest first.
    pub async fn list_by_project(&self, project_id: i64) -> AppResult<Vec<BusinessExpense>> {
        self.expenses.find_by_project(project_id).await
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        id: i64,
        data: &UpdateBusinessExpense,
    ) -> AppResult<BusinessExpense> {
        if let Some(description) = &data.description {
            if description.trim().is_empty() {
                return Err(AppError::validation("Expense description must not be empty"));
            }
        }
        if let Some(amount) = data.amount {
            if amount <= 0.0 {
                return Err(AppError::validation("Expense amount must be positive"));
            }
        }
        if let Some(pct) = data.tax_deductible_percentage {
            validate_percentage(pct)?;
        }
        self.expenses.update(id, data).await
    }

    /// Delete an expense and, best-effort, its receipt blob.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let expense = self
            .expenses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Business expense {id} not found")))?;

        if !self.expenses.delete(id).await? {
            return Err(AppError::not_found(format!("Business expense {id} not found")));
        }
        if let Some(key) = &expense.receipt_key {
            if let Err(e) = self.blobs.delete(key).await {
                warn!(expense_id = id, key = %key, error = %e, "Receipt blob delete failed");
            }
        }
        Ok(())
    }

    /// Store a scanned receipt for an expense, replacing any previous
    /// one. The old blob is removed best-effort after the new key is
    /// recorded.
    pub async fn attach_receipt(
        &self,
        id: i64,
        original_name: &str,
        data: Bytes,
    ) -> AppResult<BusinessExpense> {
        let expense = self
            .expenses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Business expense {id} not found")))?;

        let key = new_blob_key(original_name);
        self.blobs.write(&key, data).await?;

        let updated = match self.expenses.set_receipt(id, Some(&key)).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned receipt blob");
                }
                return Err(e);
            }
        };

        if let Some(old_key) = &expense.receipt_key {
            if let Err(e) = self.blobs.delete(old_key).await {
                warn!(expense_id = id, key = %old_key, error = %e, "Old receipt blob delete failed");
            }
        }
        info!(expense_id = id, key = %key, "Stored receipt");
        Ok(updated)
    }

    /// Fetch an expense's receipt contents.
    ///
    /// `NotFound` covers a missing expense, an expense without a
    /// receipt, and a missing blob.
    pub async fn receipt(&self, id: i64) -> AppResult<(BusinessExpense, Bytes)> {
        let expense = self
            .expenses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Business expense {id} not found")))?;
        let key = expense.receipt_key.clone().ok_or_else(|| {
            AppError::not_found(format!("Business expense {id} has no receipt"))
        })?;
        let data = self.blobs.read_bytes(&key).await?;
        Ok((expense, data))
    }

    /// Year-level totals with category and month splits.
    pub async fn yearly_report(&self, year: i32) -> AppResult<YearlyExpenseReport> {
        let (from, until) = period::year_range(year)?;
        let expenses = self.expenses.find_filtered(Some(from), Some(until), None).await?;
        Ok(aggregate_year(year, expenses))
    }

    /// Twelve per-month slices for a year, including empty months.
    pub async fn monthly_breakdown(&self, year: i32) -> AppResult<Vec<MonthlyExpenseBreakdown>> {
        let (from, until) = period::year_range(year)?;
        let expenses = self.expenses.find_filtered(Some(from), Some(until), None).await?;
        Ok(breakdown_by_month(&expenses))
    }

    /// Bundle all of a year's receipts into a ZIP archive.
    ///
    /// Expenses without a receipt are skipped silently; receipts whose
    /// blob has gone missing are skipped with a warning.
    pub async fn receipts_archive(&self, year: i32) -> AppResult<Bytes> {
        let (from, until) = period::year_range(year)?;
        let expenses = self.expenses.find_filtered(Some(from), Some(until), None).await?;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for expense in &expenses {
            let Some(key) = &expense.receipt_key else {
                continue;
            };
            let data = match self.blobs.read_bytes(key).await {
                Ok(data) => data,
                Err(e) if e.is_not_found() => {
                    warn!(
                        expense_id = expense.id,
                        key = %key,
                        "Skipping receipt with missing blob in archive"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            let name = receipt_entry_name(expense, key);
            writer.start_file(name, options).map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to add archive entry", e)
            })?;
            writer.write_all(&data).map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to write archive entry", e)
            })?;
        }

        let cursor = writer.finish().map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to finish archive", e)
        })?;
        Ok(Bytes::from(cursor.into_inner()))
    }
}

fn validate_percentage(pct: f64) -> AppResult<()> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(AppError::validation(
            "Deductible percentage must be between 0 and 100",
        ));
    }
    Ok(())
}

/// Fold a year's expenses into the report totals.
fn aggregate_year(year: i32, expenses: Vec<BusinessExpense>) -> YearlyExpenseReport {
    let mut total = 0.0;
    let mut deductible = 0.0;
    let mut by_category = BTreeMap::new();
    let mut by_month = BTreeMap::new();

    for expense in &expenses {
        total += expense.amount;
        deductible += expense.deductible_amount();
        *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
        *by_month.entry(expense.expense_date.month()).or_insert(0.0) += expense.amount;
    }

    YearlyExpenseReport {
        year,
        total_expenses: round2(total),
        tax_deductible_expenses: round2(deductible),
        by_category,
        by_month,
        expenses,
    }
}

/// Twelve per-month slices, months without expenses included as zeros.
fn breakdown_by_month(expenses: &[BusinessExpense]) -> Vec<MonthlyExpenseBreakdown> {
    (1..=12)
        .map(|month| {
            let in_month = expenses
                .iter()
                .filter(|e| e.expense_date.month() == month);
            let mut total = 0.0;
            let mut deductible = 0.0;
            let mut count = 0usize;
            for expense in in_month {
                total += expense.amount;
                deductible += expense.deductible_amount();
                count += 1;
            }
            MonthlyExpenseBreakdown {
                month,
                month_name: period::month_name(month),
                total_amount: round2(total),
                tax_deductible: round2(deductible),
                expense_count: count,
            }
        })
        .collect()
}

/// Archive entry name for a receipt: the expense id, a filesystem-safe
/// slice of the description, and the receipt's extension.
fn receipt_entry_name(expense: &BusinessExpense, key: &str) -> String {
    let slug: String = expense
        .description
        .chars()
        .take(40)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    match key.rsplit_once('.') {
        Some((_, ext)) => format!("{}_{}.{}", expense.id, slug, ext),
        None => format!("{}_{}", expense.id, slug),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expense(
        id: i64,
        month: u32,
        amount: f64,
        category: ExpenseCategory,
        deductible: bool,
        pct: f64,
    ) -> BusinessExpense {
        let date = Utc.with_ymd_and_hms(2026, month, 15, 12, 0, 0).unwrap();
        BusinessExpense {
            id,
            description: format!("expense {id}"),
            amount,
            category,
            expense_date: date,
            supplier_name: None,
            invoice_number: None,
            receipt_key: None,
            project_id: None,
            is_tax_deductible: deductible,
            tax_deductible_percentage: pct,
            notes: None,
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn yearly_report_splits_by_category_and_month() {
        let report = aggregate_year(
            2026,
            vec![
                expense(1, 1, 100.0, ExpenseCategory::Fuel, true, 100.0),
                expense(2, 1, 50.0, ExpenseCategory::Fuel, true, 50.0),
                expense(3, 3, 200.0, ExpenseCategory::Insurance, false, 100.0),
            ],
        );

        assert_eq!(report.total_expenses, 350.0);
        assert_eq!(report.tax_deductible_expenses, 125.0);
        assert_eq!(report.by_category[&ExpenseCategory::Fuel], 150.0);
        assert_eq!(report.by_category[&ExpenseCategory::Insurance], 200.0);
        assert_eq!(report.by_month[&1], 150.0);
        assert_eq!(report.by_month[&3], 200.0);
        assert!(!report.by_month.contains_key(&2));
    }

    #[test]
    fn monthly_breakdown_always_has_twelve_entries() {
        let rows = vec![
            expense(1, 2, 80.0, ExpenseCategory::Tools, true, 100.0),
            expense(2, 2, 20.0, ExpenseCategory::Tools, false, 100.0),
        ];
        let breakdown = breakdown_by_month(&rows);

        assert_eq!(breakdown.len(), 12);
        let february = &breakdown[1];
        assert_eq!(february.month_name, "February");
        assert_eq!(february.total_amount, 100.0);
        assert_eq!(february.tax_deductible, 80.0);
        assert_eq!(february.expense_count, 2);
        assert_eq!(breakdown[0].expense_count, 0);
        assert_eq!(breakdown[0].total_amount, 0.0);
    }

    #[test]
    fn receipt_entry_names_are_filesystem_safe() {
        let mut row = expense(7, 4, 10.0, ExpenseCategory::Office, true, 100.0);
        row.description = "printer / paper".into();
        assert_eq!(
            receipt_entry_name(&row, "abc123.pdf"),
            "7_printer___paper.pdf"
        );
        assert_eq!(receipt_entry_name(&row, "abc123"), "7_printer___paper");
    }
}
