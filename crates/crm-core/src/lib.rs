//! # crm-core
//!
//! Core crate for the Sitework CRM. Contains the blob store trait,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CRM crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
