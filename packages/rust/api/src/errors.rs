//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use jobsnap_shared::JobSnapError;

/// Errors surfaced at the HTTP boundary.
///
/// Rendered as `{"error": ..., "details": ...}` with a non-2xx status.
/// Extraction failures past input validation never reach this type; they
/// come back as degraded records instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not the expected JSON envelope.
    #[error("invalid request body: {details}")]
    InvalidBody { details: String },

    /// The envelope parsed but its contents are unusable (e.g. blank URL).
    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JobSnapError> for ApiError {
    fn from(err: JobSnapError) -> Self {
        match err {
            JobSnapError::InvalidInput { message } => Self::Validation(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidBody { details } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid request body", "details": details }),
            ),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Internal(details) => {
                tracing::error!("extraction error: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to extract job information",
                        "details": details,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_validation() {
        let err = ApiError::from(JobSnapError::input("URL is required"));
        assert!(matches!(err, ApiError::Validation(ref m) if m == "URL is required"));

        let err = ApiError::from(JobSnapError::config("bad"));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn status_codes() {
        let resp = ApiError::Validation("URL is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::InvalidBody {
            details: "EOF".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::Internal("boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
