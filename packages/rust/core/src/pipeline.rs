//! Ingest and retrieval pipelines.
//!
//! Ingest: size limit → extension allow-list → encoding normalization →
//! text validation → id generation → store. The first failing step
//! short-circuits; nothing partial is ever stored.
//!
//! Retrieval: lookup each id in input order, all-or-nothing, then apply
//! the optional rename map. The resulting items go straight to
//! [`codemerge_format::merge`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use codemerge_shared::{CodeMergeError, FileId, FileRecord, MergeItem, Result};
use codemerge_store::RecordStore;

/// Orchestrates uploads and merges against one shared [`RecordStore`].
///
/// Constructed once at startup and shared (via `Arc`) by every request
/// handler; all methods take `&self`.
pub struct FilePipeline {
    store: Arc<dyn RecordStore>,
    max_file_size: usize,
}

impl FilePipeline {
    pub fn new(store: Arc<dyn RecordStore>, max_file_size: usize) -> Self {
        Self {
            store,
            max_file_size,
        }
    }

    /// Validate, normalize, and store one uploaded file.
    ///
    /// Returns the generated record id on success. Every record that makes
    /// it into the store holds valid UTF-8 text that passed validation.
    #[instrument(skip_all, fields(filename = %filename, size = bytes.len()))]
    pub fn ingest(&self, filename: &str, bytes: &[u8]) -> Result<FileId> {
        if bytes.len() > self.max_file_size {
            return Err(CodeMergeError::SizeExceeded {
                actual: bytes.len(),
                limit: self.max_file_size,
            });
        }

        if !codemerge_format::is_supported(filename) {
            return Err(CodeMergeError::UnsupportedExtension {
                filename: filename.to_owned(),
            });
        }

        let content = codemerge_encoding::normalize(bytes)?;

        if !codemerge_encoding::is_text(&content) {
            return Err(CodeMergeError::BinaryContent {
                filename: filename.to_owned(),
            });
        }

        let id = FileId::new();
        let record = FileRecord {
            filename: filename.to_owned(),
            size: content.len(),
            content_hash: sha256_hex(&content),
            uploaded_at: Utc::now(),
            content,
        };

        info!(%id, size = record.size, hash = %record.content_hash, "file ingested");
        self.store.insert(id.clone(), record);

        Ok(id)
    }

    /// Look up a batch of records in input order and apply renames.
    ///
    /// All-or-nothing: the first missing id aborts the whole batch with
    /// [`CodeMergeError::RecordNotFound`] — the caller never gets a merge
    /// of fewer files than requested. Renames are keyed by the original
    /// filename and substituted after lookup.
    #[instrument(skip_all, fields(count = ids.len()))]
    pub fn retrieve(
        &self,
        ids: &[FileId],
        renames: &HashMap<String, String>,
    ) -> Result<Vec<MergeItem>> {
        let mut items = Vec::with_capacity(ids.len());

        for id in ids {
            let record = self
                .store
                .get(id)
                .ok_or_else(|| CodeMergeError::not_found(id.to_string()))?;

            let filename = renames
                .get(&record.filename)
                .cloned()
                .unwrap_or(record.filename);

            items.push(MergeItem {
                filename,
                content: record.content,
            });
        }

        debug!(items = items.len(), "retrieval complete");
        Ok(items)
    }

    /// Fetch one record for preview.
    pub fn lookup(&self, id: &FileId) -> Result<FileRecord> {
        self.store
            .get(id)
            .ok_or_else(|| CodeMergeError::not_found(id.to_string()))
    }

    /// Remove one record. Absent ids are a silent no-op.
    pub fn delete(&self, id: &FileId) {
        self.store.delete(id);
    }
}

/// Lowercase hex SHA-256 of a text body.
fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
