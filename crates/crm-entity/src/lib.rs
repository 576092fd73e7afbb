//! # crm-entity
//!
//! Domain entity models for the Sitework CRM. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! The folder and attachment modules also define the store traits
//! (`FolderStore`, `AttachmentStore`) that `crm-database` implements;
//! they live here because their signatures are written in terms of the
//! entity types.

pub mod attachment;
pub mod business_expense;
pub mod expense;
pub mod folder;
pub mod payment;
pub mod project;
pub mod task;
pub mod tax;
pub mod visit;
