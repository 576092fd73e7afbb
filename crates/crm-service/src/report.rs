//! Month-level financial summaries.

use chrono::{Datelike, Utc};
use serde::Serialize;

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_database::repositories::{
    BusinessExpenseRepository, PaymentRepository, TaxTrackerRepository,
};

use crate::period;

/// Revenue, spend, and tax reserve for one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// English month name.
    pub month_name: &'static str,
    /// Payments received across all projects.
    pub revenue: f64,
    /// Business expenses incurred.
    pub expenses: f64,
    /// Revenue minus expenses.
    pub net_profit: f64,
    /// VAT share of the revenue, at the tracker's current percentage.
    pub tax_reserved: f64,
}

/// Builds month-level summaries from payments and business expenses.
#[derive(Debug, Clone)]
pub struct FinanceReportService {
    payments: PaymentRepository,
    business_expenses: BusinessExpenseRepository,
    tracker: TaxTrackerRepository,
}

impl FinanceReportService {
    /// Create a new finance report service.
    pub fn new(
        payments: PaymentRepository,
        business_expenses: BusinessExpenseRepository,
        tracker: TaxTrackerRepository,
    ) -> Self {
        Self {
            payments,
            business_expenses,
            tracker,
        }
    }

    /// Summary for one calendar month.
    pub async fn monthly_summary(&self, year: i32, month: u32) -> AppResult<MonthlySummary> {
        let (from, until) = period::month_range(year, month)?;
        let revenue = self.payments.sum_in_range(from, until).await?;
        let expenses = self.business_expenses.sum_in_range(from, until).await?;
        let tax_percentage = self.tracker.get_or_init().await?.tax_percentage;

        Ok(MonthlySummary {
            year,
            month,
            month_name: period::month_name(month),
            revenue: round2(revenue),
            expenses: round2(expenses),
            net_profit: round2(revenue - expenses),
            tax_reserved: round2(revenue * tax_percentage / 100.0),
        })
    }

    /// Summaries for the last `months` calendar months, oldest first,
    /// ending with the current month.
    pub async fn monthly_breakdown(&self, months: u32) -> AppResult<Vec<MonthlySummary>> {
        if !(1..=36).contains(&months) {
            return Err(AppError::validation("Months must be between 1 and 36"));
        }

        let now = Utc::now();
        let mut year = now.year();
        let mut month = now.month();
        let mut summaries = Vec::with_capacity(months as usize);
        for _ in 0..months {
            summaries.push(self.monthly_summary(year, month).await?);
            (year, month) = period::previous_month(year, month);
        }
        summaries.reverse();
        Ok(summaries)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
