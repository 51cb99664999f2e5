//! fetchncache CLI
//!
//! Reads a YAML target list, fetches each target sequentially, and caches
//! the responses to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use fetchncache::{
    error::{AppError, Result},
    logging::Logger,
    models::Config,
    pipeline::{self, ProcessOptions, TokioSleep},
    services::{Fetcher, JsonFormat},
};

/// fetchncache - fetch HTTP targets and cache the responses to disk
#[derive(Parser, Debug)]
#[command(
    name = "fetchncache",
    version,
    about = "Fetches configured HTTP targets and caches the responses to disk"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(long)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON formatting applied to .json targets
    #[arg(long = "json-format", value_enum, default_value = "original")]
    json_format: JsonFormat,

    /// Create a 'latest' copy of each downloaded file
    #[arg(long)]
    latest: bool,

    /// Delay in seconds between targets
    #[arg(short = 'd', long, default_value_t = 0)]
    delay: i64,
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.delay < 0 {
        return Err(AppError::validation("delay must be non-negative"));
    }

    let config = Config::load(&cli.config)?;
    let logger = Logger::for_run(cli.verbose, config.logfile.as_deref().map(Path::new))?;

    logger.info(&format!("Read config file {}", cli.config.display()));
    logger.info(&format!(
        "Found {} target(s) to process",
        config.targets.len()
    ));

    let fetcher = Fetcher::new()?;
    let options = ProcessOptions {
        json_format: cli.json_format,
        latest: cli.latest,
    };

    let summary = pipeline::run_targets(
        &config,
        &fetcher,
        &options,
        Duration::from_secs(cli.delay as u64),
        &TokioSleep,
        &logger,
    )
    .await;

    if !summary.all_succeeded() {
        logger.warn(&format!(
            "{}/{} target(s) failed",
            summary.failed, summary.processed
        ));
    }

    logger.info("Done!");

    Ok(())
}
