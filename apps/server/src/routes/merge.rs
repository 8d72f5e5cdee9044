//! Merge endpoint: combine uploaded files into one download.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use codemerge_shared::{CodeMergeError, FileId};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn merge_routes() -> Router<AppState> {
    Router::new().route("/api/merge", post(handle_merge))
}

/// Merge request body.
#[derive(Debug, Deserialize)]
struct MergeRequest {
    #[serde(default)]
    file_ids: Vec<String>,
    #[serde(default)]
    output_filename: String,
    #[serde(default)]
    file_renames: HashMap<String, String>,
}

/// Retrieve the requested records in order, merge them, and stream the
/// result back as an attachment named `output_filename`.
async fn handle_merge(
    State(state): State<AppState>,
    Json(request): Json<MergeRequest>,
) -> Result<Response, ApiError> {
    if request.file_ids.is_empty() {
        return Err(ApiError::BadRequest {
            error: "missing required field",
            details: "field 'file_ids' is required".into(),
        });
    }
    if request.output_filename.is_empty() {
        return Err(ApiError::BadRequest {
            error: "missing required field",
            details: "field 'output_filename' is required".into(),
        });
    }

    // Ids are opaque strings to the client; one that does not even parse
    // is indistinguishable from one that expired.
    let ids = request
        .file_ids
        .iter()
        .map(|raw| {
            raw.parse::<FileId>()
                .map_err(|_| CodeMergeError::not_found(raw))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let items = state.pipeline.retrieve(&ids, &request.file_renames)?;
    let merged = codemerge_format::merge(&items);

    info!(
        files = items.len(),
        bytes = merged.len(),
        output = %request.output_filename,
        "merge served"
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        sanitize_filename(&request.output_filename)
    );
    let disposition = HeaderValue::from_str(&disposition).map_err(|_| ApiError::BadRequest {
        error: "invalid output filename",
        details: "output_filename contains characters not allowed in a header".into(),
    })?;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, merged).into_response())
}

/// Strip quote and newline characters that would break the
/// `Content-Disposition` header.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n' | '\\'))
        .collect()
}
