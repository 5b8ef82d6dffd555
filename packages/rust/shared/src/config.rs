//! Application configuration for jobsnap.
//!
//! User config lives at `~/.jobsnap/jobsnap.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{JobSnapError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "jobsnap.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".jobsnap";

/// Desktop Chrome user agent presented to job boards.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

// ---------------------------------------------------------------------------
// Config structs (matching jobsnap.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Headless browser settings.
    #[serde(default)]
    pub browser: BrowserConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Per-site selector overrides, keyed by adapter name
    /// (`linkedin`, `indeed`, `glassdoor`, `monster`, `generic`).
    #[serde(default)]
    pub sites: BTreeMap<String, SiteSelectorsConfig>,
}

/// `[browser]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run Chrome without a visible window.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Pass `--no-sandbox`. Required inside most containers; weakens process isolation.
    #[serde(default = "default_true")]
    pub disable_sandbox: bool,

    /// Pass `--disable-gpu`.
    #[serde(default = "default_true")]
    pub disable_gpu: bool,

    /// Pass `--disable-dev-shm-usage` (small /dev/shm in Docker).
    #[serde(default = "default_true")]
    pub disable_dev_shm_usage: bool,

    /// Explicit Chrome/Chromium binary. Auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_executable: Option<String>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Viewport width in CSS pixels.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Viewport height in CSS pixels.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Navigation budget: page load must finish within this many milliseconds.
    /// Browser launch is not counted; it has its own chromiumoxide timeout.
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_ms: u64,

    /// Fixed wait after load so client-side rendering can finish.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Additional raw Chrome command-line flags.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            disable_sandbox: true,
            disable_gpu: true,
            disable_dev_shm_usage: true,
            chrome_executable: None,
            user_agent: default_user_agent(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            navigation_timeout_ms: default_navigation_timeout(),
            settle_delay_ms: default_settle_delay(),
            extra_args: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}
fn default_viewport_width() -> u32 {
    1280
}
fn default_viewport_height() -> u32 {
    720
}
fn default_navigation_timeout() -> u64 {
    30_000
}
fn default_settle_delay() -> u64 {
    3_000
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP API listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

/// `[sites.<name>]`: replaces a site's built-in selector lists field by field.
///
/// Order matters: selectors are tried first to last and the first non-empty
/// match wins (description and generic scans aside).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSelectorsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Render config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime rendering configuration: merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub headless: bool,
    pub disable_sandbox: bool,
    pub disable_gpu: bool,
    pub disable_dev_shm_usage: bool,
    pub chrome_executable: Option<PathBuf>,
    pub user_agent: String,
    pub viewport: (u32, u32),
    pub navigation_timeout: Duration,
    pub settle_delay: Duration,
    pub extra_args: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for RenderConfig {
    fn from(config: &AppConfig) -> Self {
        let b = &config.browser;
        Self {
            headless: b.headless,
            disable_sandbox: b.disable_sandbox,
            disable_gpu: b.disable_gpu,
            disable_dev_shm_usage: b.disable_dev_shm_usage,
            chrome_executable: b.chrome_executable.as_ref().map(PathBuf::from),
            user_agent: b.user_agent.clone(),
            viewport: (b.viewport_width, b.viewport_height),
            navigation_timeout: Duration::from_millis(b.navigation_timeout_ms),
            settle_delay: Duration::from_millis(b.settle_delay_ms),
            extra_args: b.extra_args.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.jobsnap/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| JobSnapError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.jobsnap/jobsnap.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| JobSnapError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| JobSnapError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| JobSnapError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| JobSnapError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| JobSnapError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
