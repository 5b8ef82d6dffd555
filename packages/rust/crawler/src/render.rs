//! Headless browser rendering client.
//!
//! Every call to [`ChromeRenderer::render`] launches its own Chrome process
//! with a throwaway profile, loads the page, waits a fixed settle delay for
//! client-side rendering and returns the serialized DOM. The process is torn
//! down on every exit path. If the calling future is dropped mid-render, the
//! [`BrowserSession`] drop guard kills Chrome first and only then removes the
//! profile directory.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use jobsnap_shared::{JobSnapError, RenderConfig, Result};

// ---------------------------------------------------------------------------
// RenderedPage / Renderer
// ---------------------------------------------------------------------------

/// Fully rendered HTML for a single URL.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// The URL that was requested.
    pub url: String,
    /// Serialized DOM after client-side rendering.
    pub html: String,
    /// Wall time spent launching, loading and settling.
    pub elapsed: Duration,
}

/// Anything that can turn a URL into rendered HTML.
///
/// Failures are always one of the render variants of [`JobSnapError`]
/// (`BrowserLaunch`, `Navigation`, `Timeout`).
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<RenderedPage>;
}

// ---------------------------------------------------------------------------
// ChromeRenderer
// ---------------------------------------------------------------------------

/// Renders pages in a fresh headless Chrome per request.
pub struct ChromeRenderer {
    config: RenderConfig,
    profile_root: PathBuf,
}

impl ChromeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            profile_root: std::env::temp_dir(),
        }
    }

    /// Create per-request Chrome profiles under `root` instead of the temp dir.
    pub fn with_profile_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.profile_root = root.into();
        self
    }

    /// Translate our config into Chrome launch options for one session.
    fn launch_options(&self, profile_dir: &Path) -> Result<ChromeConfig> {
        let (width, height) = self.config.viewport;

        let mut builder = ChromeConfig::builder()
            .window_size(width, height)
            .viewport(Viewport {
                width,
                height,
                ..Viewport::default()
            })
            .user_data_dir(profile_dir)
            .request_timeout(self.config.navigation_timeout)
            .args(["--no-first-run", "--disable-accelerated-2d-canvas"]);

        if !self.config.headless {
            builder = builder.with_head();
        }
        if self.config.disable_sandbox {
            builder = builder
                .no_sandbox()
                .args(["--disable-setuid-sandbox", "--no-zygote"]);
        }
        if self.config.disable_gpu {
            builder = builder.arg("--disable-gpu");
        }
        if self.config.disable_dev_shm_usage {
            builder = builder.arg("--disable-dev-shm-usage");
        }
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if !self.config.extra_args.is_empty() {
            builder = builder.args(self.config.extra_args.iter().cloned());
        }

        builder.build().map_err(JobSnapError::BrowserLaunch)
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    #[instrument(skip(self), fields(timeout_ms = self.config.navigation_timeout.as_millis() as u64))]
    async fn render(&self, url: &str) -> Result<RenderedPage> {
        let start = Instant::now();
        let profile_dir = self
            .profile_root
            .join(format!("jobsnap-chrome-{}", Uuid::now_v7()));
        let options = self.launch_options(&profile_dir)?;

        let mut session = BrowserSession::launch(options, profile_dir).await?;
        let result = session.fetch(url, &self.config).await;
        session.shutdown().await;

        let html = result?;
        let elapsed = start.elapsed();
        info!(bytes = html.len(), elapsed_ms = elapsed.as_millis() as u64, "page rendered");

        Ok(RenderedPage {
            url: url.to_string(),
            html,
            elapsed,
        })
    }
}

// ---------------------------------------------------------------------------
// BrowserSession
// ---------------------------------------------------------------------------

/// One exclusively-owned Chrome process plus its CDP event loop.
///
/// `browser` is `None` once [`BrowserSession::shutdown`] has run.
struct BrowserSession {
    browser: Option<Browser>,
    handler: JoinHandle<()>,
    profile_dir: PathBuf,
}

impl BrowserSession {
    async fn launch(options: ChromeConfig, profile_dir: PathBuf) -> Result<Self> {
        let (browser, mut events) = match Browser::launch(options).await {
            Ok(launched) => launched,
            Err(e) => {
                remove_profile(&profile_dir);
                return Err(JobSnapError::BrowserLaunch(e.to_string()));
            }
        };

        // The CDP connection only makes progress while its handler is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!(profile = %profile_dir.display(), "browser launched");
        Ok(Self {
            browser: Some(browser),
            handler,
            profile_dir,
        })
    }

    /// Open a tab, load `url` within the navigation budget, settle, serialize.
    async fn fetch(&self, url: &str, config: &RenderConfig) -> Result<String> {
        let nav_err = |e: chromiumoxide::error::CdpError| JobSnapError::navigation(url, e.to_string());

        let Some(browser) = &self.browser else {
            return Err(JobSnapError::navigation(url, "browser already shut down"));
        };

        let page = browser.new_page("about:blank").await.map_err(nav_err)?;
        page.set_user_agent(SetUserAgentOverrideParams::new(config.user_agent.clone()))
            .await
            .map_err(nav_err)?;

        let navigation = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };

        match tokio::time::timeout(config.navigation_timeout, navigation).await {
            Ok(Ok(())) => debug!(url, "navigation finished"),
            Ok(Err(e)) => return Err(nav_err(e)),
            Err(_) => {
                return Err(JobSnapError::Timeout {
                    url: url.to_string(),
                    after_ms: config.navigation_timeout.as_millis() as u64,
                });
            }
        }

        // Give client-side frameworks time to paint the posting.
        tokio::time::sleep(config.settle_delay).await;

        page.content().await.map_err(nav_err)
    }

    /// Close the browser gracefully, falling back to a kill.
    async fn shutdown(&mut self) {
        if let Some(browser) = self.browser.take() {
            close_browser(browser).await;
        }
        self.handler.abort();
        debug!("browser shut down");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();

        let profile_dir = std::mem::take(&mut self.profile_dir);
        let Some(browser) = self.browser.take() else {
            remove_profile(&profile_dir);
            return;
        };

        // Cancelled mid-render: Chrome must be gone before its profile is removed.
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    kill_browser(browser).await;
                    remove_profile(&profile_dir);
                });
            }
            Err(_) => {
                // Dropping the browser kills the child process.
                drop(browser);
                remove_profile(&profile_dir);
            }
        }
    }
}

async fn close_browser(mut browser: Browser) {
    if let Err(e) = browser.close().await {
        debug!(error = %e, "graceful browser close failed, killing");
        kill_browser(browser).await;
        return;
    }
    if let Err(e) = browser.wait().await {
        debug!(error = %e, "waiting for browser exit failed");
    }
}

async fn kill_browser(mut browser: Browser) {
    if let Some(Err(e)) = browser.kill().await {
        warn!(error = %e, "failed to kill browser process");
    }
    if let Err(e) = browser.wait().await {
        debug!(error = %e, "waiting for browser exit failed");
    }
}

fn remove_profile(dir: &Path) {
    if dir.as_os_str().is_empty() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(dir) {
        if e.kind() != std::io::ErrorKind::NotFound {
            debug!(error = %e, profile = %dir.display(), "could not remove browser profile");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> RenderConfig {
        RenderConfig {
            navigation_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_millis(50),
            ..RenderConfig::default()
        }
    }

    #[tokio::test]
    async fn missing_executable_is_launch_failure() {
        let config = RenderConfig {
            chrome_executable: Some(PathBuf::from("/nonexistent/jobsnap/chrome")),
            ..quick_config()
        };
        let root = scratch_root();
        let renderer = ChromeRenderer::new(config).with_profile_root(&root);
        let err = renderer.render("https://example.com").await.unwrap_err();
        assert!(matches!(err, JobSnapError::BrowserLaunch(_)), "{err}");
        assert!(err.is_render_failure());
        assert!(profiles_left(&root).is_empty());
        std::fs::remove_dir_all(&root).unwrap();
    }

    fn scratch_root() -> PathBuf {
        let root = std::env::temp_dir().join(format!("jobsnap-render-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    fn profiles_left(root: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(root)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[tokio::test]
    async fn drop_after_shutdown_removes_profile() {
        let root = scratch_root();
        let profile_dir = root.join("jobsnap-chrome-closed");
        std::fs::create_dir_all(profile_dir.join("Default")).unwrap();
        std::fs::write(profile_dir.join("Default/Preferences"), "{}").unwrap();

        let session = BrowserSession {
            browser: None,
            handler: tokio::spawn(async {}),
            profile_dir,
        };
        drop(session);

        assert!(profiles_left(&root).is_empty());
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chrome/Chromium"]
    async fn cancelled_render_kills_browser_then_removes_profile() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/slow"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let root = scratch_root();
        let renderer = ChromeRenderer::new(RenderConfig {
            navigation_timeout: Duration::from_secs(30),
            ..quick_config()
        })
        .with_profile_root(&root);

        let url = format!("{}/slow", server.uri());
        let cancelled =
            tokio::time::timeout(Duration::from_secs(2), renderer.render(&url)).await;
        assert!(cancelled.is_err());

        let mut remaining = profiles_left(&root);
        for _ in 0..50 {
            if remaining.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
            remaining = profiles_left(&root);
        }
        assert!(remaining.is_empty(), "{remaining:?}");
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a local Chrome/Chromium"]
    async fn renders_client_side_content() {
        let server = wiremock::MockServer::start().await;
        let page = r#"<html><body><h1 id="t"></h1>
            <script>document.getElementById('t').textContent = 'Rendered Title';</script>
        </body></html>"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/job"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(page),
            )
            .mount(&server)
            .await;

        let renderer = ChromeRenderer::new(quick_config());
        let rendered = renderer.render(&format!("{}/job", server.uri())).await.unwrap();
        assert!(rendered.html.contains("Rendered Title"));
    }

    #[tokio::test]
    #[ignore = "requires a local Chrome/Chromium"]
    async fn slow_page_times_out() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/slow"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = RenderConfig {
            navigation_timeout: Duration::from_millis(500),
            ..quick_config()
        };
        let renderer = ChromeRenderer::new(config);
        let err = renderer.render(&format!("{}/slow", server.uri())).await.unwrap_err();
        assert!(matches!(err, JobSnapError::Timeout { after_ms: 500, .. }), "{err}");
    }
}
