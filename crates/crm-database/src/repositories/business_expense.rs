//! Business expense repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_entity::business_expense::model::{
    BusinessExpense, CreateBusinessExpense, ExpenseCategory, UpdateBusinessExpense,
};

/// Repository for business expense rows.
#[derive(Debug, Clone)]
pub struct BusinessExpenseRepository {
    pool: PgPool,
}

impl BusinessExpenseRepository {
    /// Create a new business expense repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a business expense; an absent date means now.
    pub async fn create(&self, data: &CreateBusinessExpense) -> AppResult<BusinessExpense> {
        sqlx::query_as::<_, BusinessExpense>(
            "INSERT INTO business_expenses \
             (description, amount, category, expense_date, supplier_name, invoice_number, \
              project_id, is_tax_deductible, tax_deductible_percentage, notes) \
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(&data.description)
        .bind(data.amount)
        .bind(data.category)
        .bind(data.expense_date)
        .bind(&data.supplier_name)
        .bind(&data.invoice_number)
        .bind(data.project_id)
        .bind(data.is_tax_deductible.unwrap_or(true))
        .bind(data.tax_deductible_percentage.unwrap_or(100.0))
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Project {:?} does not exist", data.project_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create business expense", e),
        })
    }

    /// Find a business expense by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<BusinessExpense>> {
        sqlx::query_as::<_, BusinessExpense>("SELECT * FROM business_expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find business expense", e)
            })
    }

    /// Expenses in a half-open date range, optionally narrowed to one
    /// category, newest first. `None` bounds are unbounded.
    pub async fn find_filtered(
        &self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        category: Option<ExpenseCategory>,
    ) -> AppResult<Vec<BusinessExpense>> {
        sqlx::query_as::<_, BusinessExpense>(
            "SELECT * FROM business_expenses \
             WHERE ($1::timestamptz IS NULL OR expense_date >= $1) \
               AND ($2::timestamptz IS NULL OR expense_date < $2) \
               AND ($3::expense_category IS NULL OR category = $3) \
             ORDER BY expense_date DESC, id DESC",
        )
        .bind(from)
        .bind(until)
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list business expenses", e)
        })
    }

    /// A project's business expenses, newest first.
    pub async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<BusinessExpense>> {
        sqlx::query_as::<_, BusinessExpense>(
            "SELECT * FROM business_expenses WHERE project_id = $1 \
             ORDER BY expense_date DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list business expenses", e)
        })
    }

    /// Apply a partial update; absent fields keep their stored value.
    pub async fn update(
        &self,
        id: i64,
        data: &UpdateBusinessExpense,
    ) -> AppResult<BusinessExpense> {
        sqlx::query_as::<_, BusinessExpense>(
            "UPDATE business_expenses SET \
             description = COALESCE($2, description), \
             amount = COALESCE($3, amount), \
             category = COALESCE($4, category), \
             expense_date = COALESCE($5, expense_date), \
             supplier_name = COALESCE($6, supplier_name), \
             invoice_number = COALESCE($7, invoice_number), \
             is_tax_deductible = COALESCE($8, is_tax_deductible), \
             tax_deductible_percentage = COALESCE($9, tax_deductible_percentage), \
             notes = COALESCE($10, notes), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.description)
        .bind(data.amount)
        .bind(data.category)
        .bind(data.expense_date)
        .bind(&data.supplier_name)
        .bind(&data.invoice_number)
        .bind(data.is_tax_deductible)
        .bind(data.tax_deductible_percentage)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update business expense", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Business expense {id} not found")))
    }

    /// Set or clear the receipt blob key.
    pub async fn set_receipt(&self, id: i64, key: Option<&str>) -> AppResult<BusinessExpense> {
        sqlx::query_as::<_, BusinessExpense>(
            "UPDATE business_expenses SET receipt_key = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set receipt", e))?
        .ok_or_else(|| AppError::not_found(format!("Business expense {id} not found")))
    }

    /// Total spent in a half-open date range.
    pub async fn sum_in_range(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<f64> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount), 0) FROM business_expenses \
             WHERE expense_date >= $1 AND expense_date < $2",
        )
        .bind(from)
        .bind(until)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sum business expenses", e)
        })
    }

    /// Delete a business expense.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM business_expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete business expense", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
