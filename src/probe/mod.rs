//! Probe engine.
//!
//! Drives the per-host fetch sequence — plain-HTTP probe, HTTPS probe,
//! linked-script fetches — and aggregates the evidence into a
//! [`CapabilityRecord`]. A job never fails for environmental reasons: every
//! transport or content failure just contributes no evidence, and the
//! returned record is always fully populated. The one failing class is a
//! contract violation in the job input itself.

mod record;
mod target;

use std::sync::Arc;

use futures::future::join_all;
use log::debug;
use reqwest::header::{LOCATION, STRICT_TRANSPORT_SECURITY};
use url::Url;

use crate::error_handling::{InfoType, JobError, ProcessingStats};
use crate::fetch::{fetch_resource, FetchOutcome};
use crate::inspect::{
    extract_script_sources, has_manifest_link, uses_push_subscription,
    uses_service_worker_registration,
};

pub use record::{CapabilityRecord, Job};
pub use target::JobTarget;

/// Shared resources for probe jobs.
///
/// One context serves any number of concurrent jobs; it holds only shared
/// immutable clients and counters, never per-job state.
pub struct ProbeContext {
    /// Redirect-following client for the HTTPS probe and script fetches.
    pub client: Arc<reqwest::Client>,
    /// No-redirect client for the plain-HTTP probe.
    pub redirect_client: Arc<reqwest::Client>,
    /// Failure and detection counters.
    pub stats: Arc<ProcessingStats>,
}

impl ProbeContext {
    /// Creates a probe context from already-initialized resources.
    pub fn new(
        client: Arc<reqwest::Client>,
        redirect_client: Arc<reqwest::Client>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        ProbeContext {
            client,
            redirect_client,
            stats,
        }
    }
}

/// Probes the host named by `job` and returns its capability record.
///
/// Resolves the job title into plain-HTTP and HTTPS targets, then runs
/// [`probe_targets`]. The returned future only errors on a contract
/// violation in the job input (empty or malformed title); unreachable
/// hosts, broken responses, and undecodable bodies all still resolve to a
/// complete (possibly all-false) record.
pub async fn process_job(ctx: &ProbeContext, job: &Job) -> Result<CapabilityRecord, JobError> {
    let target = JobTarget::parse(&job.title)?;
    debug!("Probing {}", target.host());
    Ok(probe_targets(ctx, target.insecure_url(), target.secure_url()).await)
}

/// Runs the probe pipeline against an already-resolved pair of target URLs.
///
/// Split out of [`process_job`] so the pipeline can be driven against
/// arbitrary URLs; the integration tests point both targets at local mock
/// servers.
///
/// The plain probe completes before the secure probe starts, and script
/// fetches start only once the secure probe has produced the page that
/// names them. The script fetches themselves run concurrently; flag
/// aggregation is an idempotent OR, so their completion order is
/// irrelevant.
pub async fn probe_targets(
    ctx: &ProbeContext,
    insecure_url: Url,
    secure_url: Url,
) -> CapabilityRecord {
    let mut record = CapabilityRecord::default();

    // Plain probe: redirects come back verbatim so the Location target can
    // be judged. The body of this response is deliberately unused —
    // manifest and script evidence only counts from the secure context.
    let insecure_outcome = fetch_resource(&ctx.redirect_client, &insecure_url).await;
    note_failure(ctx, &insecure_outcome);
    note_insecure_outcome(&mut record, &insecure_outcome, &insecure_url);

    // Secure probe: redirects are followed, since a secure page may itself
    // redirect to another secure page.
    let secure_outcome = fetch_resource(&ctx.client, &secure_url).await;
    note_failure(ctx, &secure_outcome);
    let script_urls = note_secure_outcome(&mut record, &secure_outcome);

    let script_outcomes = join_all(
        script_urls
            .iter()
            .map(|script_url| fetch_resource(&ctx.client, script_url)),
    )
    .await;
    for outcome in &script_outcomes {
        note_failure(ctx, outcome);
        note_script_outcome(&mut record, outcome);
    }

    note_detections(ctx, &record);
    record
}

fn note_failure(ctx: &ProbeContext, outcome: &FetchOutcome) {
    if let FetchOutcome::Failed(failure) = outcome {
        ctx.stats.increment_error(failure.kind.error_type());
    }
}

fn note_detections(ctx: &ProbeContext, record: &CapabilityRecord) {
    let detections = [
        (record.has_https, InfoType::SecureEndpoint),
        (record.has_hsts, InfoType::Hsts),
        (record.has_https_redirect, InfoType::HttpsRedirect),
        (record.has_manifest, InfoType::Manifest),
        (record.has_service_worker, InfoType::ServiceWorker),
        (record.has_push_subscription, InfoType::PushSubscription),
    ];
    for (detected, info_type) in detections {
        if detected {
            ctx.stats.increment_info(info_type);
        }
    }
}

/// Judges the plain-HTTP outcome: a 3xx response whose Location resolves to
/// an `https` URL is an HTTPS upgrade.
fn note_insecure_outcome(record: &mut CapabilityRecord, outcome: &FetchOutcome, base: &Url) {
    let Some(response) = outcome.response() else {
        return;
    };
    if !response.status.is_redirection() {
        return;
    }
    let Some(location) = response
        .headers
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
    else {
        return;
    };
    // Relative Location targets resolve against the probe URL and stay on
    // the plain scheme; only an https destination counts as an upgrade.
    if let Ok(destination) = base.join(location) {
        if destination.scheme() == "https" {
            record.has_https_redirect = true;
        }
    }
}

/// Judges the secure outcome and returns the script URLs to fetch next.
///
/// Any response at all — whatever the status code — proves the secure
/// endpoint answered; only transport failure withholds `has_https`.
fn note_secure_outcome(record: &mut CapabilityRecord, outcome: &FetchOutcome) -> Vec<Url> {
    let Some(response) = outcome.response() else {
        return Vec::new();
    };

    record.has_https = true;
    if response.headers.contains_key(STRICT_TRANSPORT_SECURITY) {
        record.has_hsts = true;
    }
    if response.body.is_empty() {
        return Vec::new();
    }
    if has_manifest_link(&response.body) {
        record.has_manifest = true;
    }
    extract_script_sources(&response.body, &response.final_url)
}

/// Scans one fetched script body for capability-usage patterns. Flags OR
/// into the record, so a later script can never clear an earlier match.
fn note_script_outcome(record: &mut CapabilityRecord, outcome: &FetchOutcome) {
    let Some(response) = outcome.response() else {
        return;
    };
    if uses_service_worker_registration(&response.body) {
        record.has_service_worker = true;
    }
    if uses_push_subscription(&response.body) {
        record.has_push_subscription = true;
    }
}
