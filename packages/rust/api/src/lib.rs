//! HTTP API for jobsnap.
//!
//! Exposes the extraction workflow as `POST /api/extract-job` plus a
//! `GET /health` probe. Handlers are thin: all extraction logic lives in
//! `jobsnap-core`.

pub mod errors;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use jobsnap_core::JobExtractor;

pub use errors::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<JobExtractor>,
}

impl AppState {
    pub fn new(extractor: JobExtractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

/// Build the API router (no middleware layers).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_handler))
        .route("/api/extract-job", post(routes::extract_job_handler))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use jobsnap_crawler::{AdapterRegistry, RenderedPage, Renderer};
    use jobsnap_shared::{JobSnapError, Result};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    struct TimeoutRenderer;

    #[async_trait]
    impl Renderer for TimeoutRenderer {
        async fn render(&self, url: &str) -> Result<RenderedPage> {
            Err(JobSnapError::Timeout {
                url: url.to_string(),
                after_ms: 30_000,
            })
        }
    }

    struct PageRenderer;

    #[async_trait]
    impl Renderer for PageRenderer {
        async fn render(&self, url: &str) -> Result<RenderedPage> {
            Ok(RenderedPage {
                url: url.to_string(),
                html: r#"<html><body>
                    <h1 data-test="job-title">Data Analyst</h1>
                    <div data-test="employer-name">Contoso Health</div>
                    <div data-test="job-description">Measure clinical outcomes.</div>
                </body></html>"#
                    .into(),
                elapsed: Duration::ZERO,
            })
        }
    }

    fn app(renderer: impl Renderer + 'static) -> Router {
        let extractor = JobExtractor::new(Arc::new(renderer), AdapterRegistry::new());
        build_router(AppState::new(extractor))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/extract-job")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn extract_returns_record() {
        let resp = app(PageRenderer)
            .oneshot(post_json(r#"{"url":"https://www.glassdoor.com/job-listing/x"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["jobTitle"], "Data Analyst");
        assert_eq!(body["companyName"], "Contoso Health");
        assert_eq!(body["jobDescription"], "Measure clinical outcomes.");
        assert_eq!(body["location"], "");
        assert!(body["requirements"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn render_timeout_still_returns_200() {
        let url = "https://www.linkedin.com/jobs/view/software-engineer-at-acme-corp";
        let resp = app(TimeoutRenderer)
            .oneshot(post_json(&format!(r#"{{"url":"{url}"}}"#)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["companyName"], "Acme Corp");
        assert_eq!(body["jobTitle"], "Software Engineer");
        assert!(body["jobDescription"].as_str().unwrap().contains(url));
    }

    #[tokio::test]
    async fn missing_or_blank_url_is_400() {
        for body in [r#"{}"#, r#"{"url":""}"#, r#"{"url":"   "}"#] {
            let resp = app(TimeoutRenderer).oneshot(post_json(body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
            let json = json_body(resp).await;
            assert_eq!(json["error"], "URL is required");
        }
    }

    #[tokio::test]
    async fn malformed_body_is_structured_error() {
        let resp = app(TimeoutRenderer).oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert_eq!(json["error"], "invalid request body");
        assert!(json["details"].as_str().is_some());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let resp = app(TimeoutRenderer)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["status"], "ok");
    }
}
