//! pwa_probe library: per-host PWA and transport-security capability
//! probing.
//!
//! Given a hostname, the probe engine fetches the plain-HTTP and HTTPS
//! endpoints plus the scripts the secure page links, and derives six
//! boolean capability flags: HTTPS support, HSTS, HTTP-to-HTTPS
//! redirection, web app manifest, service worker registration, and push
//! subscription usage. Transport and content failures never fail a job;
//! they just leave flags false.
//!
//! # Example
//!
//! ```no_run
//! use pwa_probe::{run_probes, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     max_concurrency: 8,
//!     ..Default::default()
//! };
//!
//! let report = run_probes(config).await?;
//! println!(
//!     "Probed {} hosts: {} succeeded, {} rejected",
//!     report.total_jobs, report.succeeded, report.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
mod fetch;
mod inspect;
pub mod initialization;
pub mod populate;
pub mod probe;
pub mod store;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ErrorType, InfoType, JobError, ProcessingStats, StoreError};
pub use fetch::{
    fetch_resource, FailureKind, FetchFailure, FetchOutcome, FetchedResponse,
};
pub use populate::{PopulateOptions, PopulationBackend, StaticList};
pub use probe::{probe_targets, process_job, CapabilityRecord, Job, JobTarget, ProbeContext};
pub use run::{run_probes, run_probes_with, ProbeReport};
pub use store::{JobStore, MemoryStore};

// Internal run module (contains the main orchestration logic)
mod run {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio::io::{AsyncBufReadExt, BufReader};

    use crate::app::{log_progress, print_probe_statistics};
    use crate::config::{Config, JOB_QUEUE_KEY, LOGGING_INTERVAL_SECS, QUEUE_IDLE_POLL};
    use crate::error_handling::{ErrorType, ProcessingStats};
    use crate::initialization::{init_client, init_redirect_client, init_semaphore};
    use crate::populate::{PopulateOptions, PopulationBackend, StaticList};
    use crate::probe::{process_job, Job, ProbeContext};
    use crate::store::{JobStore, MemoryStore};

    /// Results of a probe run.
    #[derive(Debug, Clone)]
    pub struct ProbeReport {
        /// Number of jobs consumed from the queue
        pub total_jobs: usize,
        /// Number of jobs that resolved to a capability record
        pub succeeded: usize,
        /// Number of jobs rejected as contract violations
        pub failed: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a probe pass with the default backends.
    ///
    /// Populates jobs from the static host list (or the file named by
    /// `config.hosts_file`), distributes them through an in-memory store,
    /// and probes each host. Results are stored as JSON under each job's
    /// hostname and logged at info level.
    ///
    /// # Errors
    ///
    /// Fails only for setup problems (unreadable hosts file, client
    /// initialization) or a store outage; individual hosts that are down,
    /// slow, or misbehaving never fail the run.
    pub async fn run_probes(config: Config) -> Result<ProbeReport> {
        run_probes_with(config, StaticList::new(), Arc::new(MemoryStore::new())).await
    }

    /// Runs a probe pass with an explicit population backend and store.
    ///
    /// The run loop owns all pacing: it drives `backend` on the configured
    /// populate interval, pushing each job onto the store queue, while a
    /// consumer pops jobs and probes them under the concurrency limit.
    /// Results are written back to the store keyed by hostname.
    pub async fn run_probes_with(
        config: Config,
        mut backend: impl PopulationBackend + 'static,
        store: Arc<dyn JobStore>,
    ) -> Result<ProbeReport> {
        let options = match &config.hosts_file {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .context("Failed to open hosts file")?;
                let mut lines = BufReader::new(file).lines();
                let mut hosts = Vec::new();
                while let Some(line) = lines
                    .next_line()
                    .await
                    .context("Failed to read hosts file")?
                {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    hosts.push(trimmed.to_string());
                }
                info!("Read {} hosts from {}", hosts.len(), path.display());
                PopulateOptions { hosts: Some(hosts) }
            }
            None => PopulateOptions::default(),
        };
        backend
            .configure(options)
            .await
            .context("Failed to configure population backend")?;

        store
            .select(&config.namespace)
            .await
            .context("Failed to select store namespace")?;

        let client = init_client(&config)
            .await
            .context("Failed to initialize HTTP client")?;
        let redirect_client = init_redirect_client(&config)
            .await
            .context("Failed to initialize redirect client")?;
        let stats = Arc::new(ProcessingStats::new());
        let shared_ctx = Arc::new(ProbeContext::new(
            client,
            redirect_client,
            Arc::clone(&stats),
        ));
        let semaphore = init_semaphore(config.max_concurrency);

        let start_time = std::time::Instant::now();
        let completed_jobs = Arc::new(AtomicUsize::new(0));
        let failed_jobs = Arc::new(AtomicUsize::new(0));
        let populator_done = Arc::new(AtomicBool::new(false));

        // Populator task: the backend only iterates; the cadence lives
        // here, on this interval.
        let queue_store = Arc::clone(&store);
        let done_flag = Arc::clone(&populator_done);
        let populate_interval = Duration::from_millis(config.populate_interval_ms.max(1));
        let populator = tokio::spawn(async move {
            let mut interval = tokio::time::interval(populate_interval);
            loop {
                interval.tick().await;
                let Some(batch) = backend.next_batch() else {
                    break;
                };
                for title in batch {
                    let job = Job::new(title);
                    match serde_json::to_string(&job) {
                        Ok(raw) => {
                            if let Err(e) = queue_store.push(JOB_QUEUE_KEY, &raw).await {
                                warn!("Failed to enqueue job {:?}: {e}", job.title);
                            }
                        }
                        Err(e) => warn!("Failed to serialize job {:?}: {e}", job.title),
                    }
                }
            }
            done_flag.store(true, Ordering::SeqCst);
        });

        let logging_completed = Arc::clone(&completed_jobs);
        let logging_failed = Arc::clone(&failed_jobs);
        let logging_task = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL_SECS));
            // The first tick completes immediately; skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                log_progress(start_time, &logging_completed, &logging_failed);
            }
        });

        // Consumer loop: pop jobs until the populator is done and the
        // queue has drained.
        let mut tasks = FuturesUnordered::new();
        loop {
            let raw = match store.pop(JOB_QUEUE_KEY).await {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    if populator_done.load(Ordering::SeqCst) {
                        break;
                    }
                    tokio::time::sleep(QUEUE_IDLE_POLL).await;
                    continue;
                }
                Err(e) => {
                    populator.abort();
                    logging_task.abort();
                    return Err(e).context("Job queue read failed");
                }
            };

            let job: Job = match serde_json::from_str(&raw) {
                Ok(job) => job,
                Err(e) => {
                    warn!("Discarding malformed job payload: {e}");
                    failed_jobs.fetch_add(1, Ordering::SeqCst);
                    continue;
                }
            };

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping job: {}", job.title);
                    continue;
                }
            };

            let ctx = Arc::clone(&shared_ctx);
            let result_store = Arc::clone(&store);
            let completed_clone = Arc::clone(&completed_jobs);
            let failed_clone = Arc::clone(&failed_jobs);
            tasks.push(tokio::spawn(async move {
                let _permit = permit;

                match process_job(&ctx, &job).await {
                    Ok(record) => {
                        match serde_json::to_string(&record) {
                            Ok(json) => {
                                info!("{}: {json}", job.title);
                                if let Err(e) = result_store.set(&job.title, &json).await {
                                    warn!("Failed to store result for {}: {e}", job.title);
                                    ctx.stats.increment_error(ErrorType::StoreFailure);
                                }
                            }
                            Err(e) => {
                                warn!("Failed to serialize result for {}: {e}", job.title)
                            }
                        }
                        completed_clone.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => {
                        warn!("Rejected job {:?}: {e}", job.title);
                        ctx.stats.increment_error(ErrorType::InvalidJobTitle);
                        failed_clone.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }));
        }

        while let Some(task_result) = tasks.next().await {
            if let Err(join_error) = task_result {
                failed_jobs.fetch_add(1, Ordering::SeqCst);
                warn!("Probe task panicked: {:?}", join_error);
            }
        }

        if let Err(join_error) = populator.await {
            warn!("Populator task panicked: {:?}", join_error);
        }
        logging_task.abort();

        log_progress(start_time, &completed_jobs, &failed_jobs);
        print_probe_statistics(&stats);

        let succeeded = completed_jobs.load(Ordering::SeqCst);
        let failed = failed_jobs.load(Ordering::SeqCst);
        Ok(ProbeReport {
            total_jobs: succeeded + failed,
            succeeded,
            failed,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
