//! Attachment entity and store contract.

pub mod model;
pub mod store;

pub use model::{Attachment, CreateAttachment};
pub use store::AttachmentStore;
