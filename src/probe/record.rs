//! Job and result types.

use serde::{Deserialize, Serialize};

/// A unit of probing work: one hostname, optionally `host:port`.
///
/// Jobs travel through the store queue as JSON and are consumed exactly
/// once; nothing mutates a job after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// The hostname to probe, optionally with an explicit port.
    pub title: String,
}

impl Job {
    /// Creates a job for the given hostname.
    pub fn new(title: impl Into<String>) -> Self {
        Job {
            title: title.into(),
        }
    }
}

/// The six capability flags produced per probed host.
///
/// All flags default to false; only explicit evidence sets a flag true, and
/// a flag once set is never cleared within the same job. The record is
/// always fully populated no matter how many fetches failed along the way.
///
/// Serialized field names match the wire contract the results are stored
/// under (`hasHTTPS`, `hasHSTS`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    /// An HTTPS endpoint on the host answered.
    #[serde(rename = "hasHTTPS")]
    pub has_https: bool,

    /// The HTTPS response carried a Strict-Transport-Security header.
    #[serde(rename = "hasHSTS")]
    pub has_hsts: bool,

    /// The plain HTTP endpoint redirected to an HTTPS target.
    #[serde(rename = "hasHTTPSRedirect")]
    pub has_https_redirect: bool,

    /// The HTTPS page links a web app manifest.
    #[serde(rename = "hasManifest")]
    pub has_manifest: bool,

    /// A script reachable from the HTTPS page registers a service worker.
    #[serde(rename = "hasServiceWorker")]
    pub has_service_worker: bool,

    /// A script reachable from the HTTPS page subscribes to push.
    #[serde(rename = "hasPushSubscription")]
    pub has_push_subscription: bool,
}
