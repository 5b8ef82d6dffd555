//! Shared types, error model, and configuration for jobsnap.
//!
//! This crate is the foundation depended on by all other jobsnap crates.
//! It provides:
//! - [`JobSnapError`]: the unified error type
//! - Domain types ([`JobPostingRecord`], [`RawCandidate`])
//! - Configuration ([`AppConfig`], [`RenderConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BrowserConfig, RenderConfig, ServerConfig, SiteSelectorsConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{JobSnapError, Result};
pub use types::{
    COMPANY_PLACEHOLDER, JOB_TITLE_PLACEHOLDER, JobPostingRecord, MAX_REQUIREMENTS, RawCandidate,
};
