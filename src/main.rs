//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `pwa_probe` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use pwa_probe::initialization::init_logger_with;
use pwa_probe::{run_probes, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file if one exists.
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_probes(config).await {
        Ok(report) => {
            println!(
                "Probed {} host{} ({} succeeded, {} rejected) in {:.1}s",
                report.total_jobs,
                if report.total_jobs == 1 { "" } else { "s" },
                report.succeeded,
                report.failed,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("pwa_probe error: {:#}", e);
            process::exit(1);
        }
    }
}
