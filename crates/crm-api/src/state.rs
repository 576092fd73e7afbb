//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crm_core::config::AppConfig;
use crm_service::{
    ArchiveService, AttachmentService, BusinessExpenseService, ExpenseService,
    FinanceReportService, HierarchyService, PaymentService, ProjectService, TaskService,
    TaxReportService, VisitService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool, for health checks.
    pub db_pool: PgPool,
    /// Folder tree operations.
    pub hierarchy: Arc<HierarchyService>,
    /// ZIP assembly and download resolution.
    pub archive: Arc<ArchiveService>,
    /// Upload / download / delete of single files.
    pub attachments: Arc<AttachmentService>,
    /// Project CRUD.
    pub projects: Arc<ProjectService>,
    /// Payment recording.
    pub payments: Arc<PaymentService>,
    /// Expense recording.
    pub expenses: Arc<ExpenseService>,
    /// Company-wide to-do tasks.
    pub tasks: Arc<TaskService>,
    /// Site visit tracking.
    pub visits: Arc<VisitService>,
    /// Company-wide expenses with receipts and tax reports.
    pub business_expenses: Arc<BusinessExpenseService>,
    /// Month-level finance summaries.
    pub reports: Arc<FinanceReportService>,
    /// Running VAT tracker.
    pub tax: Arc<TaxReportService>,
}
