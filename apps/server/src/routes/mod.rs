//! HTTP route handlers and the JSON error envelope.

mod file;
mod health;
mod merge;
mod upload;

pub use file::file_routes;
pub use health::health_routes;
pub use merge::merge_routes;
pub use upload::upload_routes;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use codemerge_shared::CodeMergeError;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Transport-level error: a core error or a malformed request.
#[derive(Debug)]
pub enum ApiError {
    Core(CodeMergeError),
    BadRequest {
        error: &'static str,
        details: String,
    },
}

impl From<CodeMergeError> for ApiError {
    fn from(err: CodeMergeError) -> Self {
        Self::Core(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest {
            error: "invalid multipart body",
            details: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            Self::Core(err) => {
                let (status, label) = match &err {
                    CodeMergeError::RecordNotFound { .. } => {
                        (StatusCode::NOT_FOUND, "file not found")
                    }
                    CodeMergeError::EncodingUnrecognized
                    | CodeMergeError::BinaryContent { .. }
                    | CodeMergeError::UnsupportedExtension { .. }
                    | CodeMergeError::SizeExceeded { .. } => {
                        (StatusCode::BAD_REQUEST, "file validation failed")
                    }
                    CodeMergeError::Config { .. } | CodeMergeError::Io { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
                    }
                };
                (status, label.to_string(), Some(err.to_string()))
            }
            Self::BadRequest { error, details } => {
                (StatusCode::BAD_REQUEST, error.to_string(), Some(details))
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
