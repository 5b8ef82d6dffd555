//! End-to-end extraction: URL → render → adapter → repair → record.
//!
//! [`JobExtractor::extract`] rejects a blank URL up front. A rendering
//! failure produces a degraded record built from the URL alone,
//! and every placeholder an adapter leaves behind is repaired before the
//! record is handed out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use jobsnap_crawler::{AdapterRegistry, ChromeRenderer, Document, Renderer};
use jobsnap_shared::{
    AppConfig, COMPANY_PLACEHOLDER, JOB_TITLE_PLACEHOLDER, JobPostingRecord, JobSnapError,
    MAX_REQUIREMENTS, RawCandidate, RenderConfig, Result,
};

use crate::heuristics::{
    UNKNOWN_COMPANY, UNKNOWN_TITLE, company_from_host, company_from_url, job_title_from_url,
};

/// Adapter name reported for records built without a rendered page.
const URL_ONLY: &str = "url-only";

/// Outcome of one extraction request.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The finished record returned to callers.
    pub record: JobPostingRecord,
    /// Adapter that produced the candidate (`url-only` when degraded).
    pub adapter: String,
    /// `true` when rendering failed and the record came from the URL alone.
    pub degraded: bool,
    /// Total time spent on the request.
    pub elapsed: Duration,
}

/// Renders job pages and turns them into [`JobPostingRecord`]s.
///
/// Stateless between calls; safe to share behind an `Arc` across concurrent
/// requests. Each call gets its own browser from the renderer.
pub struct JobExtractor {
    renderer: Arc<dyn Renderer>,
    registry: AdapterRegistry,
}

impl JobExtractor {
    pub fn new(renderer: Arc<dyn Renderer>, registry: AdapterRegistry) -> Self {
        Self { renderer, registry }
    }

    /// Chrome renderer and site adapters configured from `config`.
    pub fn from_config(config: &AppConfig, render: RenderConfig) -> Self {
        Self::new(
            Arc::new(ChromeRenderer::new(render)),
            AdapterRegistry::from_config(config),
        )
    }

    /// Extract a job posting from `url`.
    ///
    /// Returns [`JobSnapError::InvalidInput`] for a blank URL. Render
    /// failures (launch, navigation, timeout) are absorbed into a degraded
    /// record; anything else is passed through.
    #[instrument(skip(self))]
    pub async fn extract(&self, url: &str) -> Result<Extraction> {
        let url = url.trim();
        if url.is_empty() {
            return Err(JobSnapError::input("URL is required"));
        }

        let start = Instant::now();
        info!("extracting job posting");

        let extraction = match self.renderer.render(url).await {
            Ok(page) => self.extract_from_html(url, &page.html),
            Err(e) if e.is_render_failure() => {
                warn!(error = %e, "rendering failed, falling back to URL heuristics");
                self.degraded(url)
            }
            Err(e) => return Err(e),
        };

        let extraction = Extraction {
            elapsed: start.elapsed(),
            ..extraction
        };
        info!(
            adapter = %extraction.adapter,
            degraded = extraction.degraded,
            company = %extraction.record.company_name,
            title = %extraction.record.job_title,
            elapsed_ms = extraction.elapsed.as_millis() as u64,
            "extraction finished"
        );
        Ok(extraction)
    }

    /// Run the adapter and repair pass over already-rendered HTML.
    ///
    /// Deterministic: the same `url` and `html` always give the same record.
    pub fn extract_from_html(&self, url: &str, html: &str) -> Extraction {
        let start = Instant::now();
        let doc = Document::parse(html);
        let adapter = self.registry.detect(url);
        debug!(adapter = adapter.name(), "adapter selected");

        let candidate = adapter.extract(&doc, url);
        let record = repair(candidate, url, adapter.name() == "generic");

        Extraction {
            record,
            adapter: adapter.name().to_string(),
            degraded: false,
            elapsed: start.elapsed(),
        }
    }

    /// Record built from the URL alone, used when the page could not be rendered.
    fn degraded(&self, url: &str) -> Extraction {
        let on_job_board = self.registry.detect(url).name() != "generic";
        let record = repair(RawCandidate::default(), url, !on_job_board);

        Extraction {
            record,
            adapter: URL_ONLY.to_string(),
            degraded: true,
            elapsed: Duration::ZERO,
        }
    }
}

/// Stand-in description when nothing could be extracted.
pub fn fallback_description(url: &str) -> String {
    format!(
        "Job description could not be automatically extracted from {url}. \
         Please manually enter the job description for better analysis."
    )
}

/// Turn a raw candidate into a finished record.
///
/// Empty or placeholder company/title fall back to the URL heuristics, then
/// (for non-board sites) to the site's own name, then to fixed "unknown"
/// labels, so no placeholder ever leaves this function.
fn repair(candidate: RawCandidate, url: &str, use_host_name: bool) -> JobPostingRecord {
    let RawCandidate {
        company_name,
        job_title,
        job_description,
        location,
        salary,
        mut requirements,
    } = candidate;

    let company_name = if is_missing(&company_name, COMPANY_PLACEHOLDER) {
        let guess = company_from_url(url);
        if !is_missing(&guess, COMPANY_PLACEHOLDER) {
            guess
        } else if use_host_name {
            company_from_host(url)
        } else {
            UNKNOWN_COMPANY.to_string()
        }
    } else {
        company_name
    };

    let job_title = if is_missing(&job_title, JOB_TITLE_PLACEHOLDER) {
        let guess = job_title_from_url(url);
        if is_missing(&guess, JOB_TITLE_PLACEHOLDER) {
            UNKNOWN_TITLE.to_string()
        } else {
            guess
        }
    } else {
        job_title
    };

    let job_description = match job_description.trim() {
        "" => fallback_description(url),
        text => text.to_string(),
    };

    requirements.truncate(MAX_REQUIREMENTS);

    JobPostingRecord {
        company_name,
        job_title,
        job_description,
        location,
        salary,
        requirements,
    }
}

fn is_missing(value: &str, placeholder: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == placeholder
}
