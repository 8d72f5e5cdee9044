//! Shared types, error model, and configuration for CodeMerge.
//!
//! This crate is the foundation depended on by all other CodeMerge crates.
//! It provides:
//! - [`CodeMergeError`] — the unified error type
//! - Domain types ([`FileId`], [`FileRecord`], [`MergeItem`])
//! - Configuration ([`AppConfig`], config loading, env overrides)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, LimitsConfig, RetentionConfig, ServerConfig, apply_env_overrides, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{CodeMergeError, Result};
pub use types::{FileId, FileRecord, MergeItem};
