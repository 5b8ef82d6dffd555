//! jobsnap CLI: pull structured job postings out of job-board pages.
//!
//! Runs one-off extractions from the terminal or serves the HTTP API.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
