//! Repository implementations for all CRM entities.

pub mod attachment;
pub mod business_expense;
pub mod expense;
pub mod folder;
pub mod payment;
pub mod project;
pub mod task;
pub mod tax;
pub mod visit;

pub use attachment::AttachmentRepository;
pub use business_expense::BusinessExpenseRepository;
pub use expense::ExpenseRepository;
pub use folder::FolderRepository;
pub use payment::PaymentRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;
pub use tax::TaxTrackerRepository;
pub use visit::VisitRepository;
