//! Expense recording.

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_database::repositories::ExpenseRepository;
use crm_entity::expense::model::{CreateExpense, Expense};

/// Expense operations for a project.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    expenses: ExpenseRepository,
}

impl ExpenseService {
    /// Create a new expense service.
    pub fn new(expenses: ExpenseRepository) -> Self {
        Self { expenses }
    }

    /// Record an expense against a project.
    pub async fn create(&self, data: &CreateExpense) -> AppResult<Expense> {
        if data.amount <= 0.0 {
            return Err(AppError::validation("Expense amount must be positive"));
        }
        if data.description.trim().is_empty() {
            return Err(AppError::validation("Expense description must not be empty"));
        }
        self.expenses.create(data).await
    }

    /// List a project's expenses, newest first.
    pub async fn list_by_project(&self, project_id: i64) -> AppResult<Vec<Expense>> {
        self.expenses.find_by_project(project_id).await
    }

    /// Delete an expense.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.expenses.delete(id).await? {
            return Err(AppError::not_found(format!("Expense {id} not found")));
        }
        Ok(())
    }
}
