//! Error types for CodeMerge.
//!
//! Library crates use [`CodeMergeError`] via `thiserror`.
//! The server app wraps this with `color-eyre` for rich diagnostics and
//! maps each variant to an HTTP status at the transport boundary.

use std::path::PathBuf;

/// Top-level error type for all CodeMerge operations.
#[derive(Debug, thiserror::Error)]
pub enum CodeMergeError {
    /// No candidate decoding produced valid UTF-8 text.
    #[error("unable to convert content to UTF-8: unrecognized encoding")]
    EncodingUnrecognized,

    /// Content decoded, but contains control characters outside the
    /// text allow-list.
    #[error("file appears to be binary: {filename}")]
    BinaryContent { filename: String },

    /// The filename's extension is not in the supported set.
    #[error("unsupported file extension: {filename}")]
    UnsupportedExtension { filename: String },

    /// A lookup or retrieve referenced an absent or expired id.
    #[error("file not found: {id}")]
    RecordNotFound { id: String },

    /// An individual or aggregate size limit was exceeded.
    #[error("size limit exceeded: {actual} bytes (limit {limit})")]
    SizeExceeded { actual: usize, limit: usize },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error (config file handling).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CodeMergeError>;

impl CodeMergeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a not-found error for the given id string.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
