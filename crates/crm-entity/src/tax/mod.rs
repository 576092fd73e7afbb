//! Tax tracker entity.

pub mod model;

pub use model::TaxTracker;
