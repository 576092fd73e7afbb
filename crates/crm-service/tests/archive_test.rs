//! Archive assembly tests over the in-memory stores.

use std::io::{Cursor, Read};
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use zip::ZipArchive;

use crm_core::traits::blob::BlobStore;
use crm_database::memory::{MemoryAttachmentStore, MemoryFolderStore};
use crm_service::{ArchiveService, AttachmentService, DownloadPayload, HierarchyService};
use crm_storage::MemoryBlobStore;

struct Fixture {
    hierarchy: HierarchyService,
    uploads: AttachmentService,
    archive: ArchiveService,
    blobs: MemoryBlobStore,
}

fn fixture() -> Fixture {
    let folders = MemoryFolderStore::new();
    let attachments = MemoryAttachmentStore::new();
    let blobs = MemoryBlobStore::new();

    let folder_store: Arc<dyn crm_entity::folder::store::FolderStore> = Arc::new(folders);
    let attachment_store: Arc<dyn crm_entity::attachment::store::AttachmentStore> =
        Arc::new(attachments);
    let blob_store: Arc<dyn BlobStore> = Arc::new(blobs.clone());

    Fixture {
        hierarchy: HierarchyService::new(
            folder_store.clone(),
            attachment_store.clone(),
            blob_store.clone(),
        ),
        uploads: AttachmentService::new(
            folder_store.clone(),
            attachment_store.clone(),
            blob_store.clone(),
        ),
        archive: ArchiveService::new(folder_store, attachment_store, blob_store),
        blobs,
    }
}

fn entry_names(data: &Bytes) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(data.to_vec())).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn entry_contents(data: &Bytes, name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(data.to_vec())).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf).unwrap();
    buf
}

#[tokio::test]
async fn folder_subtree_keeps_its_shape() {
    let fx = fixture();

    // F/a.txt and F/G/b.txt.
    let f = fx.hierarchy.create_folder(1, "F", None).await.unwrap();
    let g = fx.hierarchy.create_folder(1, "G", Some(f.id)).await.unwrap();
    fx.uploads
        .upload(1, Some(f.id), "a.txt", Bytes::from_static(b"alpha"))
        .await
        .unwrap();
    fx.uploads
        .upload(1, Some(g.id), "b.txt", Bytes::from_static(b"beta"))
        .await
        .unwrap();

    let data = fx.archive.build_archive(&[], &[f.id]).await.unwrap();
    let names = entry_names(&data);
    assert_eq!(names, vec!["F/a.txt", "F/G/b.txt"]);
    assert_eq!(entry_contents(&data, "F/a.txt"), b"alpha");
    assert_eq!(entry_contents(&data, "F/G/b.txt"), b"beta");
}

#[tokio::test]
async fn loose_files_land_at_archive_root() {
    let fx = fixture();

    let a = fx
        .uploads
        .upload(1, None, "one.txt", Bytes::from_static(b"1"))
        .await
        .unwrap();
    let b = fx
        .uploads
        .upload(1, None, "two.txt", Bytes::from_static(b"2"))
        .await
        .unwrap();

    let data = fx.archive.build_archive(&[a.id, b.id], &[]).await.unwrap();
    assert_eq!(entry_names(&data), vec!["one.txt", "two.txt"]);
}

#[tokio::test]
async fn mixed_selection_combines_roots_and_subtrees() {
    let fx = fixture();

    let loose = fx
        .uploads
        .upload(1, None, "readme.md", Bytes::from_static(b"hi"))
        .await
        .unwrap();
    let docs = fx.hierarchy.create_folder(1, "Docs", None).await.unwrap();
    fx.uploads
        .upload(1, Some(docs.id), "spec.pdf", Bytes::from_static(b"pdf"))
        .await
        .unwrap();

    let data = fx
        .archive
        .build_archive(&[loose.id], &[docs.id])
        .await
        .unwrap();
    assert_eq!(entry_names(&data), vec!["readme.md", "Docs/spec.pdf"]);
}

#[tokio::test]
async fn unknown_ids_and_missing_blobs_are_skipped() {
    let fx = fixture();

    let kept = fx
        .uploads
        .upload(1, None, "kept.txt", Bytes::from_static(b"k"))
        .await
        .unwrap();
    let rotted = fx
        .uploads
        .upload(1, None, "rotted.txt", Bytes::from_static(b"r"))
        .await
        .unwrap();
    fx.blobs.corrupt(&rotted.filename).await;

    let data = fx
        .archive
        .build_archive(&[kept.id, rotted.id, 999], &[888])
        .await
        .unwrap();
    assert_eq!(entry_names(&data), vec!["kept.txt"]);
}

#[tokio::test]
async fn single_file_selection_bypasses_archiving() {
    let fx = fixture();

    let file = fx
        .uploads
        .upload(1, None, "report.pdf", Bytes::from_static(b"raw-pdf"))
        .await
        .unwrap();

    let payload = fx
        .archive
        .download_selection(&[file.id], &[])
        .await
        .unwrap();
    match payload {
        DownloadPayload::Single { attachment, stream } => {
            assert_eq!(attachment.original_name, "report.pdf");
            let chunks: Vec<Bytes> = stream.try_collect().await.unwrap();
            let data: Vec<u8> = chunks.concat();
            assert_eq!(data, b"raw-pdf");
        }
        DownloadPayload::Archive { .. } => panic!("expected a raw payload"),
    }
}

#[tokio::test]
async fn direct_download_streams_blob() {
    let fx = fixture();

    let file = fx
        .uploads
        .upload(1, None, "plan.dwg", Bytes::from_static(b"drawing"))
        .await
        .unwrap();

    let (attachment, stream) = fx.uploads.download(file.id).await.unwrap();
    assert_eq!(attachment.original_name, "plan.dwg");
    let chunks: Vec<Bytes> = stream.try_collect().await.unwrap();
    assert_eq!(chunks.concat(), b"drawing");

    let err = fx.uploads.download(999).await.err().unwrap();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn single_file_with_folder_still_archives() {
    let fx = fixture();

    let folder = fx.hierarchy.create_folder(1, "F", None).await.unwrap();
    let file = fx
        .uploads
        .upload(1, None, "a.txt", Bytes::from_static(b"a"))
        .await
        .unwrap();

    let payload = fx
        .archive
        .download_selection(&[file.id], &[folder.id])
        .await
        .unwrap();
    assert!(matches!(payload, DownloadPayload::Archive { .. }));
}

#[tokio::test]
async fn single_selection_with_missing_blob_is_not_found() {
    let fx = fixture();

    let file = fx
        .uploads
        .upload(1, None, "gone.txt", Bytes::from_static(b"x"))
        .await
        .unwrap();
    fx.blobs.corrupt(&file.filename).await;

    let err = fx
        .archive
        .download_selection(&[file.id], &[])
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = fx.archive.download_selection(&[999], &[]).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn empty_folder_yields_empty_archive() {
    let fx = fixture();

    let folder = fx.hierarchy.create_folder(1, "Empty", None).await.unwrap();
    let data = fx.archive.build_archive(&[], &[folder.id]).await.unwrap();
    assert!(entry_names(&data).is_empty());
}
