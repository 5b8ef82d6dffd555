//! CLI command definitions, routing, and tracing setup.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use jobsnap_api::AppState;
use jobsnap_core::{Extraction, JobExtractor};
use jobsnap_shared::{AppConfig, RenderConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// jobsnap: turn job posting URLs into structured records.
#[derive(Parser)]
#[command(
    name = "jobsnap",
    version,
    about = "Extract company, title, description and requirements from job posting pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.jobsnap/jobsnap.toml.
    #[arg(long, global = true, env = "JOBSNAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Browser overrides shared by commands that render pages.
#[derive(clap::Args, Debug, Default)]
pub(crate) struct BrowserArgs {
    /// Navigation timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Extra wait after navigation for client-side rendering, in milliseconds.
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Path to the Chrome/Chromium executable.
    #[arg(long)]
    pub chrome: Option<PathBuf>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract a job posting and print it as JSON.
    Extract {
        /// Job posting URL.
        url: String,

        /// Read HTML from this file instead of rendering the URL.
        #[arg(long)]
        html: Option<PathBuf>,

        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Serve the HTTP API.
    Serve {
        /// Address to bind (overrides `server.bind`).
        #[arg(long)]
        bind: Option<String>,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "jobsnap=info,tower_http=info",
        1 => "jobsnap=debug,tower_http=debug",
        _ => "jobsnap=trace,tower_http=debug,chromiumoxide=debug",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Extract {
            url,
            html,
            compact,
            browser,
        } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_extract(&config, &url, html.as_deref(), compact, &browser).await
        }
        Command::Serve { bind, browser } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_serve(&config, bind.as_deref(), &browser).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path.as_deref()).await,
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Apply command-line browser overrides on top of the config file.
fn render_config(config: &AppConfig, args: &BrowserArgs) -> RenderConfig {
    let mut render = RenderConfig::from(config);
    if let Some(ms) = args.timeout_ms {
        render.navigation_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = args.settle_ms {
        render.settle_delay = Duration::from_millis(ms);
    }
    if let Some(chrome) = &args.chrome {
        render.chrome_executable = Some(chrome.clone());
    }
    render
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_extract(
    config: &AppConfig,
    url: &str,
    html: Option<&Path>,
    compact: bool,
    browser: &BrowserArgs,
) -> Result<()> {
    let extractor = JobExtractor::from_config(config, render_config(config, browser));

    let extraction = match html {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read HTML from '{}'", path.display()))?;
            let url = url.trim();
            if url.is_empty() {
                return Err(eyre!("URL is required"));
            }
            info!(url, file = %path.display(), "extracting from local HTML");
            extractor.extract_from_html(url, &html)
        }
        None => {
            let spinner = spinner(&format!("Rendering {url}"))?;
            let result = extractor.extract(url).await;
            spinner.finish_and_clear();
            result?
        }
    };

    print_extraction(&extraction, compact)
}

fn print_extraction(extraction: &Extraction, compact: bool) -> Result<()> {
    if extraction.degraded {
        eprintln!("  warning: page could not be rendered; record built from the URL only");
    }

    let json = if compact {
        serde_json::to_string(&extraction.record)?
    } else {
        serde_json::to_string_pretty(&extraction.record)?
    };
    println!("{json}");
    Ok(())
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

async fn cmd_serve(config: &AppConfig, bind: Option<&str>, browser: &BrowserArgs) -> Result<()> {
    let bind = bind.unwrap_or(&config.server.bind);
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| eyre!("invalid bind address '{bind}': {e}"))?;

    let extractor = JobExtractor::from_config(config, render_config(config, browser));
    info!(%addr, "starting API server");

    jobsnap_api::serve(addr, AppState::new(extractor))
        .await
        .wrap_err("API server failed")
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
