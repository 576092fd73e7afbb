//! # crm-api
//!
//! HTTP API layer for the CRM built on Axum: routes, DTOs, error
//! mapping, and handlers. Authentication is deliberately absent; the
//! application is a single-user tool behind a trusted boundary.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
