//! In-memory store implementations.
//!
//! Single-node stand-ins for the PostgreSQL repositories, used by tests
//! and offline tooling. They implement the same store contracts with a
//! tokio mutex around plain maps.

pub mod attachment;
pub mod folder;

pub use attachment::MemoryAttachmentStore;
pub use folder::MemoryFolderStore;
