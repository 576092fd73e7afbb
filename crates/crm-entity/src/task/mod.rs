//! Task entity.

pub mod model;

pub use model::{CreateTask, Task, TaskPriority};
