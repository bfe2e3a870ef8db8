//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and programmatic configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_NAMESPACE, DEFAULT_USER_AGENT, FETCH_TIMEOUT_SECS,
    POPULATE_INTERVAL_MS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Runtime configuration.
///
/// Doubles as the CLI surface (clap derive) and can be constructed
/// programmatically; `Config::default()` gives a usable baseline for
/// library callers and tests.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pwa_probe",
    about = "Probe hosts for PWA and transport-security capabilities"
)]
pub struct Config {
    /// File with one host (or host:port) per line; empty lines and lines
    /// starting with '#' are skipped. Defaults to the built-in host list.
    #[arg(long)]
    pub hosts_file: Option<PathBuf>,

    /// Maximum concurrent probe jobs
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-fetch timeout in seconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Store namespace for jobs and results
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Interval between population ticks in milliseconds
    #[arg(long, default_value_t = POPULATE_INTERVAL_MS)]
    pub populate_interval_ms: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            populate_interval_ms: POPULATE_INTERVAL_MS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
