//! ZIP archive assembly for bulk downloads.

use std::io::{Cursor, Write};
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_core::traits::blob::{BlobStore, ByteStream};
use crm_entity::attachment::model::Attachment;
use crm_entity::attachment::store::AttachmentStore;
use crm_entity::folder::store::FolderStore;

/// What a download selection resolves to.
pub enum DownloadPayload {
    /// Exactly one file was selected: the raw blob stream, no archiving.
    Single {
        /// The attachment metadata, for naming and content type.
        attachment: Attachment,
        /// The blob contents.
        stream: ByteStream,
    },
    /// Multiple files or any folder: a ZIP archive.
    Archive {
        /// The assembled archive.
        data: Bytes,
    },
}

impl std::fmt::Debug for DownloadPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single { attachment, .. } => f
                .debug_struct("Single")
                .field("attachment", attachment)
                .finish_non_exhaustive(),
            Self::Archive { data } => f.debug_struct("Archive").field("data", data).finish(),
        }
    }
}

/// Assembles ZIP archives from selections of files and folder subtrees.
#[derive(Debug, Clone)]
pub struct ArchiveService {
    folders: Arc<dyn FolderStore>,
    attachments: Arc<dyn AttachmentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ArchiveService {
    /// Create a new archive service over the given stores.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        attachments: Arc<dyn AttachmentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            folders,
            attachments,
            blobs,
        }
    }

    /// Resolve a download selection to its payload.
    ///
    /// Exactly one file id and no folder ids bypasses archiving and
    /// streams the raw blob; a missing blob there is `NotFound`. Any
    /// other selection is assembled into an archive.
    pub async fn download_selection(
        &self,
        file_ids: &[i64],
        folder_ids: &[i64],
    ) -> AppResult<DownloadPayload> {
        if let ([id], []) = (file_ids, folder_ids) {
            let attachment = self
                .attachments
                .find_by_id(*id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Attachment {id} not found")))?;
            let stream = self.blobs.open_read(&attachment.filename).await?;
            return Ok(DownloadPayload::Single { attachment, stream });
        }

        let data = self.build_archive(file_ids, folder_ids).await?;
        Ok(DownloadPayload::Archive { data })
    }

    /// Build a ZIP archive from loose file ids and folder subtree ids.
    ///
    /// Loose files land at the archive root under their display name;
    /// folder subtrees keep their shape, entry paths joined with `/`.
    /// Ids that no longer resolve (deleted concurrently) and files whose
    /// blob is gone are skipped with a warning, never failing the
    /// archive.
    pub async fn build_archive(&self, file_ids: &[i64], folder_ids: &[i64]) -> AppResult<Bytes> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut entries = 0usize;

        for &id in file_ids {
            let Some(attachment) = self.attachments.find_by_id(id).await? else {
                warn!(attachment_id = id, "Skipping unknown attachment in archive");
                continue;
            };
            if self
                .add_entry(&mut writer, options, &attachment.original_name, &attachment)
                .await?
            {
                entries += 1;
            }
        }

        for &id in folder_ids {
            let Some(root) = self.folders.find_by_id(id).await? else {
                warn!(folder_id = id, "Skipping unknown folder in archive");
                continue;
            };

            // Depth-first, files before sub-folders at each level.
            let mut stack: Vec<(i64, String)> = vec![(root.id, root.name.clone())];
            while let Some((folder_id, path)) = stack.pop() {
                for file in self.attachments.find_by_folder(folder_id).await? {
                    let name = format!("{path}/{}", file.original_name);
                    if self.add_entry(&mut writer, options, &name, &file).await? {
                        entries += 1;
                    }
                }
                let children = self.folders.find_children_of(folder_id).await?;
                for child in children.into_iter().rev() {
                    let child_path = format!("{path}/{}", child.name);
                    stack.push((child.id, child_path));
                }
            }
        }

        let cursor = writer
            .finish()
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to finish archive", e))?;
        let data = Bytes::from(cursor.into_inner());
        debug!(entries, bytes = data.len(), "Assembled archive");
        Ok(data)
    }

    /// Write one attachment's blob into the archive under `entry_name`.
    ///
    /// Returns `false` (after a warning) when the blob is missing.
    async fn add_entry(
        &self,
        writer: &mut ZipWriter<Cursor<Vec<u8>>>,
        options: SimpleFileOptions,
        entry_name: &str,
        attachment: &Attachment,
    ) -> AppResult<bool> {
        let data = match self.blobs.read_bytes(&attachment.filename).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                warn!(
                    attachment_id = attachment.id,
                    key = %attachment.filename,
                    "Skipping attachment with missing blob in archive"
                );
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        writer.start_file(entry_name, options).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to add archive entry", e)
        })?;
        writer.write_all(&data).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to write archive entry", e)
        })?;
        Ok(true)
    }
}
