//! Shared application state for request handlers.

use std::sync::Arc;

use codemerge_core::FilePipeline;
use codemerge_shared::LimitsConfig;

/// State handed to every handler. Cheap to clone: the pipeline (and the
/// record store behind it) is shared, not copied.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FilePipeline>,
    pub limits: LimitsConfig,
}
