//! Blob store providers.

pub mod local;
pub mod memory;

use uuid::Uuid;

/// Generate an opaque, collision-resistant blob key.
///
/// The original extension (if any) is kept so that the key alone is
/// enough to guess a sensible content type later. Only plain
/// alphanumeric extensions make it into the key; anything else (path
/// separators, dots, unicode) is dropped and the key is a bare UUID.
pub fn new_blob_key(original_name: &str) -> String {
    match original_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!("{}.{}", Uuid::new_v4(), ext.to_lowercase())
        }
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_key_keeps_extension() {
        let key = new_blob_key("Photo.JPG");
        assert!(key.ends_with(".jpg"));
        assert_ne!(key, new_blob_key("Photo.JPG"));
    }

    #[test]
    fn blob_key_without_extension() {
        let key = new_blob_key("README");
        assert!(!key.contains('.'));
    }

    #[test]
    fn blob_key_drops_unsafe_extension() {
        // A '/' smuggled through the extension must never reach the key,
        // where it would read as a path component.
        let key = new_blob_key("report.p/df");
        assert!(!key.contains('/'));
        assert!(!key.contains('.'));

        let key = new_blob_key("notes.tar.gz ");
        assert!(!key.contains(' '));
    }
}
