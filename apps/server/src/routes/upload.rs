//! File upload endpoint.

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use codemerge_shared::CodeMergeError;

use crate::routes::ApiError;
use crate::state::AppState;

pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/api/upload", post(handle_upload))
}

/// Successful upload response.
#[derive(Debug, Serialize)]
struct UploadResponse {
    message: String,
    file_ids: Vec<String>,
}

/// Accept `multipart/form-data` with one or more `files` parts.
///
/// Each part is ingested independently; the first rejected part fails the
/// whole request (the client retries as a unit). An aggregate size cap
/// applies across all parts on top of the per-file limit.
async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file_ids = Vec::new();
    let mut total_bytes = 0usize;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("files") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .unwrap_or_else(|| "unnamed".to_owned());
        let data = field.bytes().await?;

        total_bytes += data.len();
        if total_bytes > state.limits.max_total_size_bytes {
            return Err(CodeMergeError::SizeExceeded {
                actual: total_bytes,
                limit: state.limits.max_total_size_bytes,
            }
            .into());
        }

        let id = state.pipeline.ingest(&filename, &data)?;
        file_ids.push(id.to_string());
    }

    if file_ids.is_empty() {
        return Err(ApiError::BadRequest {
            error: "no files in request",
            details: "multipart field 'files' is required".into(),
        });
    }

    info!(count = file_ids.len(), total_bytes, "upload accepted");

    Ok(Json(UploadResponse {
        message: format!("uploaded {} file(s)", file_ids.len()),
        file_ids,
    }))
}
