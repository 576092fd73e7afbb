//! # crm-storage
//!
//! Blob store implementations for the CRM. The local filesystem provider
//! backs production; the in-memory provider backs tests.

pub mod providers;

pub use providers::local::LocalBlobStore;
pub use providers::memory::MemoryBlobStore;
pub use providers::new_blob_key;
