//! Traits implemented by downstream crates.

pub mod blob;

pub use blob::{BlobStore, ByteStream};
