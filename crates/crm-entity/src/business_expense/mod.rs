//! Business-level expense entity.

pub mod model;

pub use model::{BusinessExpense, CreateBusinessExpense, ExpenseCategory, UpdateBusinessExpense};
