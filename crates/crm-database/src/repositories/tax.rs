//! Tax tracker repository implementation.

use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::tax::model::TaxTracker;

/// Repository for the single-row tax tracker.
#[derive(Debug, Clone)]
pub struct TaxTrackerRepository {
    pool: PgPool,
}

impl TaxTrackerRepository {
    /// Create a new tax tracker repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the tracker row, creating it with defaults on first use.
    pub async fn get_or_init(&self) -> AppResult<TaxTracker> {
        let existing =
            sqlx::query_as::<_, TaxTracker>("SELECT * FROM tax_tracker ORDER BY id ASC LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load tax tracker", e)
                })?;

        if let Some(tracker) = existing {
            return Ok(tracker);
        }

        sqlx::query_as::<_, TaxTracker>(
            "INSERT INTO tax_tracker (untaxed_amount, tax_percentage, calculated_tax) \
             VALUES (0, 17.0, 0) RETURNING *",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to init tax tracker", e))
    }

    /// Persist updated tracker values.
    pub async fn save(&self, tracker: &TaxTracker) -> AppResult<TaxTracker> {
        sqlx::query_as::<_, TaxTracker>(
            "UPDATE tax_tracker SET untaxed_amount = $2, tax_percentage = $3, \
             calculated_tax = $4, last_reset_date = $5 WHERE id = $1 RETURNING *",
        )
        .bind(tracker.id)
        .bind(tracker.untaxed_amount)
        .bind(tracker.tax_percentage)
        .bind(tracker.calculated_tax)
        .bind(tracker.last_reset_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save tax tracker", e))?
        .ok_or_else(|| AppError::not_found("Tax tracker row missing"))
    }
}
