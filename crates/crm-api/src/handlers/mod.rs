//! HTTP request handlers, one module per domain.

pub mod attachment;
pub mod business_expense;
pub mod expense;
pub mod folder;
pub mod health;
pub mod payment;
pub mod project;
pub mod report;
pub mod task;
pub mod tax;
pub mod visit;
