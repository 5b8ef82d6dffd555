//! Extraction orchestration and URL heuristics for jobsnap.
//!
//! This crate ties together rendering, site adapters and the repair pass
//! into the single `extract` workflow used by the CLI and the HTTP API.

pub mod extractor;
pub mod heuristics;

pub use extractor::{Extraction, JobExtractor, fallback_description};
pub use heuristics::{company_from_host, company_from_url, job_title_from_url};
