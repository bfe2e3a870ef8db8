//! Configuration constants.
//!
//! This module defines the operational constants used throughout the
//! application: timeouts, size limits, queue keys, and population cadence.

use std::time::Duration;

/// Default maximum concurrent probe jobs (semaphore limit).
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Progress logging interval in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

/// Per-fetch timeout in seconds.
///
/// Applies to every individual GET the prober performs (page probes and
/// script fetches alike). Expiry surfaces as a failure outcome, never as a
/// job failure.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Maximum response body size in bytes (2MB).
///
/// Bodies larger than this degrade to empty; status and headers are kept,
/// so header-derived capability evidence survives.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Interval between population ticks in milliseconds.
///
/// The run loop owns this timer; population backends only iterate.
pub const POPULATE_INTERVAL_MS: u64 = 100;

/// Hostnames emitted per population tick.
pub const POPULATE_BATCH_SIZE: usize = 2;

/// Store queue key under which pending jobs are pushed.
pub const JOB_QUEUE_KEY: &str = "url-jobs";

/// Default store namespace for jobs and results.
pub const DEFAULT_NAMESPACE: &str = "pwa-probe";

/// Sleep between queue polls while the populator is still producing.
pub const QUEUE_IDLE_POLL: Duration = Duration::from_millis(50);

/// Default User-Agent string for HTTP requests.
///
/// A current-ish browser UA: capability probing targets real-world hosts,
/// and some of them serve different markup (or block outright) for
/// non-browser agents. Override via the `--user-agent` flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
