//! Error types for jobsnap.
//!
//! Library crates use [`JobSnapError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all jobsnap operations.
#[derive(Debug, thiserror::Error)]
pub enum JobSnapError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Caller supplied unusable input (e.g. a blank URL).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The browser process could not be started or connected to.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// The browser started but navigating to the page failed.
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// Navigation did not finish within the time budget.
    #[error("navigation to {url} timed out after {after_ms}ms")]
    Timeout { url: String, after_ms: u64 },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, JobSnapError>;

impl JobSnapError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Create a navigation error for `url`.
    pub fn navigation(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came out of the rendering stage (launch, navigation, timeout).
    pub fn is_render_failure(&self) -> bool {
        matches!(
            self,
            Self::BrowserLaunch(_) | Self::Navigation { .. } | Self::Timeout { .. }
        )
    }
}
