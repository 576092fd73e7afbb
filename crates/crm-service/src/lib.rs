//! # crm-service
//!
//! Business logic for the CRM. The hierarchy service owns the folder
//! tree (listing, creation, recursive deletion); the archive service
//! assembles multi-file ZIP downloads; the attachment service handles
//! uploads and single-file downloads. The remaining services are
//! conventional CRUD over the database repositories.

pub mod archive;
pub mod attachment;
pub mod business_expense;
pub mod expense;
pub mod hierarchy;
pub mod payment;
pub mod period;
pub mod project;
pub mod report;
pub mod task;
pub mod tax;
pub mod visit;

pub use archive::{ArchiveService, DownloadPayload};
pub use attachment::AttachmentService;
pub use business_expense::{
    BusinessExpenseService, ExpenseFilter, MonthlyExpenseBreakdown, YearlyExpenseReport,
};
pub use expense::ExpenseService;
pub use hierarchy::{DeleteReport, FolderListing, HierarchyService};
pub use payment::PaymentService;
pub use project::{ProjectService, ProjectWithTotals};
pub use report::{FinanceReportService, MonthlySummary};
pub use task::TaskService;
pub use tax::TaxReportService;
pub use visit::VisitService;
