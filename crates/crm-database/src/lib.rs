//! # crm-database
//!
//! PostgreSQL connection management, concrete repository implementations
//! for all CRM entities, and in-memory store implementations used by
//! single-node tooling and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::create_pool;
