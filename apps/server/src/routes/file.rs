//! Single-file preview and deletion.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use codemerge_shared::{CodeMergeError, FileId};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn file_routes() -> Router<AppState> {
    Router::new().route("/api/file/{id}", get(get_file).delete(delete_file))
}

/// Serve a stored record's normalized content for preview.
async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let file_id = parse_id(&id)?;
    let record = state.pipeline.lookup(&file_id)?;

    // The hash is lowercase hex, always a valid header value.
    let etag = HeaderValue::from_str(&format!("\"{}\"", record.content_hash))
        .unwrap_or_else(|_| HeaderValue::from_static("\"\""));

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        ),
        (header::ETAG, etag),
    ];

    Ok((headers, record.content).into_response())
}

/// Remove a record ahead of its TTL. Idempotent: deleting an absent or
/// already-expired id still returns 204.
async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if let Ok(file_id) = id.parse::<FileId>() {
        state.pipeline.delete(&file_id);
    }
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<FileId, ApiError> {
    raw.parse::<FileId>()
        .map_err(|_| CodeMergeError::not_found(raw).into())
}
