//! Folder entity and store contract.

pub mod model;
pub mod store;

pub use model::{CreateFolder, Folder};
pub use store::FolderStore;
