//! Payment recording.

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_database::repositories::PaymentRepository;
use crm_entity::payment::model::{CreatePayment, Payment};

/// Payment operations for a project.
#[derive(Debug, Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
}

impl PaymentService {
    /// Create a new payment service.
    pub fn new(payments: PaymentRepository) -> Self {
        Self { payments }
    }

    /// Record a payment against a project.
    pub async fn create(&self, data: &CreatePayment) -> AppResult<Payment> {
        if data.amount <= 0.0 {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        self.payments.create(data).await
    }

    /// List a project's payments, newest first.
    pub async fn list_by_project(&self, project_id: i64) -> AppResult<Vec<Payment>> {
        self.payments.find_by_project(project_id).await
    }

    /// Delete a payment.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.payments.delete(id).await? {
            return Err(AppError::not_found(format!("Payment {id} not found")));
        }
        Ok(())
    }
}
