//! Business expense entity model.
//!
//! Business expenses are company-wide costs (fuel, insurance, tools)
//! tracked for tax deduction, as opposed to the per-project `expense`
//! rows that feed project profitability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tax-relevant category of a business expense.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "expense_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Fuel,
    Materials,
    Tools,
    Transportation,
    Office,
    ProfessionalServices,
    Insurance,
    Phone,
    Other,
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        Self::Other
    }
}

/// A company-wide expense tracked for tax deduction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BusinessExpense {
    /// Unique expense identifier.
    pub id: i64,
    /// What the money was spent on.
    pub description: String,
    /// Amount spent.
    pub amount: f64,
    /// Tax-relevant category.
    pub category: ExpenseCategory,
    /// When the expense was incurred.
    pub expense_date: DateTime<Utc>,
    /// Who was paid.
    pub supplier_name: Option<String>,
    /// The supplier's invoice number.
    pub invoice_number: Option<String>,
    /// Blob key of the scanned receipt, when one was uploaded.
    pub receipt_key: Option<String>,
    /// The related project, if any. Cleared when the project is deleted.
    pub project_id: Option<i64>,
    /// Whether this expense counts against taxable income.
    pub is_tax_deductible: bool,
    /// How much of the amount is deductible, 0–100.
    pub tax_deductible_percentage: f64,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl BusinessExpense {
    /// The deductible share of the amount: zero when the expense is not
    /// deductible, otherwise `amount` scaled by the deductible
    /// percentage.
    pub fn deductible_amount(&self) -> f64 {
        if self.is_tax_deductible {
            self.amount * self.tax_deductible_percentage / 100.0
        } else {
            0.0
        }
    }
}

/// Data required to record a business expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBusinessExpense {
    /// What the money was spent on.
    pub description: String,
    /// Amount spent.
    pub amount: f64,
    /// Tax-relevant category; defaults to `other`.
    #[serde(default)]
    pub category: ExpenseCategory,
    /// When the expense was incurred; absent means now.
    pub expense_date: Option<DateTime<Utc>>,
    /// Who was paid.
    pub supplier_name: Option<String>,
    /// The supplier's invoice number.
    pub invoice_number: Option<String>,
    /// The related project, if any.
    pub project_id: Option<i64>,
    /// Whether this expense counts against taxable income; defaults to
    /// true.
    pub is_tax_deductible: Option<bool>,
    /// Deductible percentage, 0–100; defaults to 100.
    pub tax_deductible_percentage: Option<f64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Partial update of a business expense; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBusinessExpense {
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<f64>,
    /// New category.
    pub category: Option<ExpenseCategory>,
    /// New expense date.
    pub expense_date: Option<DateTime<Utc>>,
    /// New supplier name.
    pub supplier_name: Option<String>,
    /// New invoice number.
    pub invoice_number: Option<String>,
    /// New deductibility flag.
    pub is_tax_deductible: Option<bool>,
    /// New deductible percentage.
    pub tax_deductible_percentage: Option<f64>,
    /// New notes.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: f64, deductible: bool, pct: f64) -> BusinessExpense {
        BusinessExpense {
            id: 1,
            description: "diesel".into(),
            amount,
            category: ExpenseCategory::Fuel,
            expense_date: Utc::now(),
            supplier_name: None,
            invoice_number: None,
            receipt_key: None,
            project_id: None,
            is_tax_deductible: deductible,
            tax_deductible_percentage: pct,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn deductible_amount_scales_by_percentage() {
        assert_eq!(expense(200.0, true, 100.0).deductible_amount(), 200.0);
        assert_eq!(expense(200.0, true, 50.0).deductible_amount(), 100.0);
    }

    #[test]
    fn non_deductible_expense_contributes_nothing() {
        assert_eq!(expense(200.0, false, 100.0).deductible_amount(), 0.0);
    }
}
