//! Route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use jobsnap_shared::JobPostingRecord;

use crate::AppState;
use crate::errors::ApiError;

/// Body of `POST /api/extract-job`.
#[derive(Debug, Deserialize)]
pub struct ExtractJobRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobsnap-api"
    }))
}

/// POST /api/extract-job
///
/// 200 with a record for every non-blank URL, degraded or not.
pub async fn extract_job_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractJobRequest>, JsonRejection>,
) -> Result<Json<JobPostingRecord>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody {
        details: rejection.body_text(),
    })?;
    let url = request.url.unwrap_or_default();

    let span = info_span!("extract_job", request_id = %Uuid::now_v7());
    let extraction = state.extractor.extract(&url).instrument(span).await?;

    Ok(Json(extraction.record))
}
