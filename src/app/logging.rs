//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs progress information about job processing.
pub fn log_progress(
    start_time: std::time::Instant,
    completed_jobs: &AtomicUsize,
    failed_jobs: &AtomicUsize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed_jobs.load(Ordering::SeqCst);
    let failed = failed_jobs.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Probed {} hosts ({} rejected) in {:.2} seconds (~{:.2} hosts/sec)",
        completed, failed, elapsed_secs, rate
    );
}
