//! Running VAT tracker model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Running total of income that VAT has not yet been remitted for.
///
/// Stored as a single row; every recorded payment adds to
/// `untaxed_amount` and recomputes `calculated_tax`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaxTracker {
    /// Row identifier (the table holds one row).
    pub id: i64,
    /// Income accumulated since the last reset.
    pub untaxed_amount: f64,
    /// VAT percentage used for the calculation.
    pub tax_percentage: f64,
    /// VAT owed on the accumulated income.
    pub calculated_tax: f64,
    /// When the tracker was last reset, if ever.
    pub last_reset_date: Option<DateTime<Utc>>,
}

impl TaxTracker {
    /// Recompute `calculated_tax` from the current amount and percentage.
    pub fn recalculate(&mut self) {
        self.calculated_tax = self.untaxed_amount * self.tax_percentage / 100.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recalculate_applies_percentage() {
        let mut t = TaxTracker {
            id: 1,
            untaxed_amount: 2000.0,
            tax_percentage: 17.0,
            calculated_tax: 0.0,
            last_reset_date: None,
        };
        t.recalculate();
        assert!((t.calculated_tax - 340.0).abs() < 1e-9);
    }
}
