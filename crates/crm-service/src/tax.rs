//! Running VAT tracker.

use chrono::Utc;
use tracing::info;

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_database::repositories::TaxTrackerRepository;
use crm_entity::tax::model::TaxTracker;

/// Maintains the single-row running VAT tracker.
#[derive(Debug, Clone)]
pub struct TaxReportService {
    tracker: TaxTrackerRepository,
}

impl TaxReportService {
    /// Create a new tax report service.
    pub fn new(tracker: TaxTrackerRepository) -> Self {
        Self { tracker }
    }

    /// Current tracker state.
    pub async fn summary(&self) -> AppResult<TaxTracker> {
        self.tracker.get_or_init().await
    }

    /// Add a received payment to the untaxed running total.
    pub async fn add_payment(&self, amount: f64) -> AppResult<TaxTracker> {
        if amount <= 0.0 {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        let mut tracker = self.tracker.get_or_init().await?;
        tracker.untaxed_amount += amount;
        tracker.recalculate();
        self.tracker.save(&tracker).await
    }

    /// Change the VAT percentage and recompute the owed amount.
    pub async fn set_percentage(&self, percentage: f64) -> AppResult<TaxTracker> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(AppError::validation(
                "Tax percentage must be between 0 and 100",
            ));
        }
        let mut tracker = self.tracker.get_or_init().await?;
        tracker.tax_percentage = percentage;
        tracker.recalculate();
        self.tracker.save(&tracker).await
    }

    /// Zero the running total, e.g. after remitting VAT.
    pub async fn reset(&self) -> AppResult<TaxTracker> {
        let mut tracker = self.tracker.get_or_init().await?;
        tracker.untaxed_amount = 0.0;
        tracker.calculated_tax = 0.0;
        tracker.last_reset_date = Some(Utc::now());
        let saved = self.tracker.save(&tracker).await?;
        info!("Tax tracker reset");
        Ok(saved)
    }
}
