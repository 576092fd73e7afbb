//! End-to-end folder tree tests over the in-memory stores.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_core::traits::blob::{BlobStore, ByteStream};
use crm_database::memory::{MemoryAttachmentStore, MemoryFolderStore};
use crm_entity::folder::store::FolderStore;
use crm_service::{AttachmentService, HierarchyService};
use crm_storage::MemoryBlobStore;

struct Fixture {
    hierarchy: HierarchyService,
    uploads: AttachmentService,
    folders: MemoryFolderStore,
    attachments: MemoryAttachmentStore,
    blobs: MemoryBlobStore,
}

fn fixture() -> Fixture {
    let folders = MemoryFolderStore::new();
    let attachments = MemoryAttachmentStore::new();
    let blobs = MemoryBlobStore::new();

    let folder_store: Arc<dyn crm_entity::folder::store::FolderStore> = Arc::new(folders.clone());
    let attachment_store: Arc<dyn crm_entity::attachment::store::AttachmentStore> =
        Arc::new(attachments.clone());
    let blob_store: Arc<dyn BlobStore> = Arc::new(blobs.clone());

    Fixture {
        hierarchy: HierarchyService::new(
            folder_store.clone(),
            attachment_store.clone(),
            blob_store.clone(),
        ),
        uploads: AttachmentService::new(folder_store, attachment_store, blob_store),
        folders,
        attachments,
        blobs,
    }
}

/// Blob store whose deletes always fail, simulating a disk sweep that
/// cannot keep up with metadata deletion.
#[derive(Debug, Clone)]
struct StuckDiskBlobStore {
    inner: MemoryBlobStore,
}

#[async_trait]
impl BlobStore for StuckDiskBlobStore {
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.inner.write(key, data).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        Err(AppError::storage(format!("Cannot delete {key}")))
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(key).await
    }

    async fn open_read(&self, key: &str) -> AppResult<ByteStream> {
        self.inner.open_read(key).await
    }
}

#[tokio::test]
async fn listing_splits_folders_and_files() {
    let fx = fixture();

    let docs = fx.hierarchy.create_folder(1, "Documents", None).await.unwrap();
    fx.hierarchy.create_folder(1, "Photos", None).await.unwrap();
    fx.uploads
        .upload(1, None, "invoice.pdf", Bytes::from_static(b"pdf"))
        .await
        .unwrap();
    fx.uploads
        .upload(1, Some(docs.id), "contract.pdf", Bytes::from_static(b"pdf"))
        .await
        .unwrap();

    let root = fx.hierarchy.list_contents(1, None).await.unwrap();
    assert_eq!(root.folders.len(), 2);
    assert_eq!(root.files.len(), 1);
    assert_eq!(root.files[0].original_name, "invoice.pdf");
    // Newest first: "Photos" was created after "Documents".
    assert_eq!(root.folders[0].name, "Photos");

    let inside = fx.hierarchy.list_contents(1, Some(docs.id)).await.unwrap();
    assert!(inside.folders.is_empty());
    assert_eq!(inside.files.len(), 1);
    assert_eq!(inside.files[0].original_name, "contract.pdf");
}

#[tokio::test]
async fn listing_unknown_folder_is_not_found() {
    let fx = fixture();
    let err = fx.hierarchy.list_contents(1, Some(99)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn listing_cross_project_folder_is_rejected() {
    let fx = fixture();
    let other = fx.hierarchy.create_folder(2, "Theirs", None).await.unwrap();
    let err = fx
        .hierarchy
        .list_contents(1, Some(other.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidReference);
}

#[tokio::test]
async fn create_folder_rejects_empty_name() {
    let fx = fixture();
    let err = fx.hierarchy.create_folder(1, "   ", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(fx.folders.is_empty().await);
}

#[tokio::test]
async fn create_folder_rejects_bad_parent_before_writing() {
    let fx = fixture();

    let err = fx
        .hierarchy
        .create_folder(1, "Orphan", Some(42))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidReference);

    let other = fx.hierarchy.create_folder(2, "Theirs", None).await.unwrap();
    let err = fx
        .hierarchy
        .create_folder(1, "Sneaky", Some(other.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidReference);

    // Only the probe folder from project 2 exists.
    assert_eq!(fx.folders.len().await, 1);
}

#[tokio::test]
async fn duplicate_sibling_names_are_allowed() {
    let fx = fixture();
    let a = fx.hierarchy.create_folder(1, "Photos", None).await.unwrap();
    let b = fx.hierarchy.create_folder(1, "Photos", None).await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn recursive_delete_removes_subtree_and_nothing_else() {
    let fx = fixture();

    // Project 7: invoice.pdf at root, "Site Photos" with one file and a
    // "Before" sub-folder holding another.
    fx.uploads
        .upload(7, None, "invoice.pdf", Bytes::from_static(b"pdf"))
        .await
        .unwrap();
    let photos = fx
        .hierarchy
        .create_folder(7, "Site Photos", None)
        .await
        .unwrap();
    let before = fx
        .hierarchy
        .create_folder(7, "Before", Some(photos.id))
        .await
        .unwrap();
    fx.uploads
        .upload(7, Some(photos.id), "roof.jpg", Bytes::from_static(b"jpg"))
        .await
        .unwrap();
    fx.uploads
        .upload(7, Some(before.id), "damage.jpg", Bytes::from_static(b"jpg"))
        .await
        .unwrap();

    let report = fx
        .hierarchy
        .delete_folder_recursive(photos.id)
        .await
        .unwrap();
    assert_eq!(report.folders_deleted, 2);
    assert_eq!(report.files_deleted, 2);
    assert_eq!(report.blob_failures, 0);
    assert!(!report.is_degraded());

    // Only the root file survives, in metadata and on disk.
    let remaining = fx.attachments.all().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].original_name, "invoice.pdf");
    assert!(fx.folders.is_empty().await);
    assert_eq!(fx.blobs.len().await, 1);
}

#[tokio::test]
async fn recursive_delete_leaves_no_orphans() {
    let fx = fixture();

    let root = fx.hierarchy.create_folder(1, "A", None).await.unwrap();
    let mid = fx
        .hierarchy
        .create_folder(1, "B", Some(root.id))
        .await
        .unwrap();
    let leaf = fx
        .hierarchy
        .create_folder(1, "C", Some(mid.id))
        .await
        .unwrap();
    for folder in [root.id, mid.id, leaf.id] {
        fx.uploads
            .upload(1, Some(folder), "f.txt", Bytes::from_static(b"x"))
            .await
            .unwrap();
    }

    let report = fx.hierarchy.delete_folder_recursive(root.id).await.unwrap();
    assert_eq!(report.folders_deleted, 3);
    assert_eq!(report.files_deleted, 3);

    // No attachment may reference a folder that no longer exists.
    for attachment in fx.attachments.all().await {
        if let Some(folder_id) = attachment.folder_id {
            assert!(fx.folders.find_by_id(folder_id).await.unwrap().is_some());
        }
    }
    assert!(fx.attachments.is_empty().await);
    assert!(fx.blobs.is_empty().await);
}

#[tokio::test]
async fn recursive_delete_is_idempotent() {
    let fx = fixture();

    let folder = fx.hierarchy.create_folder(1, "Gone", None).await.unwrap();
    fx.uploads
        .upload(1, Some(folder.id), "f.txt", Bytes::from_static(b"x"))
        .await
        .unwrap();

    fx.hierarchy.delete_folder_recursive(folder.id).await.unwrap();

    let err = fx
        .hierarchy
        .delete_folder_recursive(folder.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(fx.folders.is_empty().await);
    assert!(fx.attachments.is_empty().await);
}

#[tokio::test]
async fn blob_failures_degrade_the_report_but_metadata_wins() {
    let folders = MemoryFolderStore::new();
    let attachments = MemoryAttachmentStore::new();
    let inner = MemoryBlobStore::new();
    let blobs: Arc<dyn BlobStore> = Arc::new(StuckDiskBlobStore {
        inner: inner.clone(),
    });

    let folder_store: Arc<dyn crm_entity::folder::store::FolderStore> = Arc::new(folders.clone());
    let attachment_store: Arc<dyn crm_entity::attachment::store::AttachmentStore> =
        Arc::new(attachments.clone());
    let hierarchy = HierarchyService::new(
        folder_store.clone(),
        attachment_store.clone(),
        blobs.clone(),
    );
    let uploads = AttachmentService::new(folder_store, attachment_store, blobs);

    let folder = hierarchy.create_folder(1, "Stuck", None).await.unwrap();
    uploads
        .upload(1, Some(folder.id), "a.txt", Bytes::from_static(b"a"))
        .await
        .unwrap();
    uploads
        .upload(1, Some(folder.id), "b.txt", Bytes::from_static(b"b"))
        .await
        .unwrap();

    let report = hierarchy.delete_folder_recursive(folder.id).await.unwrap();
    assert_eq!(report.folders_deleted, 1);
    assert_eq!(report.files_deleted, 2);
    assert_eq!(report.blob_failures, 2);
    assert!(report.is_degraded());

    // Metadata is gone even though the physical files are stuck.
    assert!(folders.is_empty().await);
    assert!(attachments.is_empty().await);
    assert_eq!(inner.len().await, 2);
}

#[tokio::test]
async fn rename_folder_keeps_contents() {
    let fx = fixture();

    let folder = fx.hierarchy.create_folder(1, "Old", None).await.unwrap();
    fx.uploads
        .upload(1, Some(folder.id), "f.txt", Bytes::from_static(b"x"))
        .await
        .unwrap();

    let renamed = fx.hierarchy.rename_folder(folder.id, "New").await.unwrap();
    assert_eq!(renamed.name, "New");

    let listing = fx.hierarchy.list_contents(1, Some(folder.id)).await.unwrap();
    assert_eq!(listing.files.len(), 1);

    let err = fx.hierarchy.rename_folder(999, "X").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn rename_attachment_preserves_extension() {
    let fx = fixture();

    let photo = fx
        .uploads
        .upload(1, None, "photo.jpg", Bytes::from_static(b"jpg"))
        .await
        .unwrap();

    let renamed = fx
        .hierarchy
        .rename_attachment(photo.id, "vacation")
        .await
        .unwrap();
    assert_eq!(renamed.original_name, "vacation.jpg");
    // The on-disk key never changes.
    assert_eq!(renamed.filename, photo.filename);

    let explicit = fx
        .hierarchy
        .rename_attachment(photo.id, "summer.png")
        .await
        .unwrap();
    assert_eq!(explicit.original_name, "summer.png");

    let err = fx.hierarchy.rename_attachment(999, "x").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn upload_validates_target_folder() {
    let fx = fixture();

    let err = fx
        .uploads
        .upload(1, Some(42), "f.txt", Bytes::from_static(b"x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidReference);

    let other = fx.hierarchy.create_folder(2, "Theirs", None).await.unwrap();
    let err = fx
        .uploads
        .upload(1, Some(other.id), "f.txt", Bytes::from_static(b"x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidReference);

    // Nothing was written anywhere.
    assert!(fx.attachments.is_empty().await);
    assert!(fx.blobs.is_empty().await);
}

#[tokio::test]
async fn delete_single_attachment_removes_metadata_and_blob() {
    let fx = fixture();

    let file = fx
        .uploads
        .upload(1, None, "f.txt", Bytes::from_static(b"x"))
        .await
        .unwrap();

    let report = fx.uploads.delete(file.id).await.unwrap();
    assert_eq!(report.files_deleted, 1);
    assert!(fx.attachments.is_empty().await);
    assert!(fx.blobs.is_empty().await);

    let err = fx.uploads.delete(file.id).await.unwrap_err();
    assert!(err.is_not_found());
}
