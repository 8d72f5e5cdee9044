//! Core domain types for CodeMerge file records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// FileId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for uploaded-file identifiers (time-sortable).
///
/// Generated once per ingest and never reused while the record is live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub Uuid);

impl FileId {
    /// Generate a new time-sortable file identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// FileRecord
// ---------------------------------------------------------------------------

/// One stored file: normalized content plus metadata.
///
/// Records are immutable once stored — replacement is delete + insert.
/// The store keys records by [`FileId`]; the id is not duplicated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Original client-supplied name; drives comment-style selection and
    /// the default output header text.
    pub filename: String,
    /// UTF-8 content body.
    pub content: String,
    /// Insertion timestamp, used only to compute age for expiry.
    pub uploaded_at: DateTime<Utc>,
    /// Byte length of `content` in UTF-8, informational.
    pub size: usize,
    /// Lowercase hex SHA-256 of `content`, informational (served as ETag).
    pub content_hash: String,
}

// ---------------------------------------------------------------------------
// MergeItem
// ---------------------------------------------------------------------------

/// A `(filename, content)` pair ready for merge formatting.
///
/// The filename here is the output name — any rename has already been
/// applied by the retrieval pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeItem {
    pub filename: String,
    pub content: String,
}
