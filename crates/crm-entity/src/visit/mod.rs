//! Site visit entity.

pub mod model;

pub use model::{CreateVisit, Visit};
