//! HTTP client initialization.
//!
//! This module provides functions to initialize the two HTTP clients the
//! probe engine uses: one that follows redirects transparently (secure-page
//! and script fetches) and one with redirects disabled (the plain-HTTP
//! probe, where the engine inspects the redirect target itself).

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the redirect-following HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Per-request timeout from the config
/// - Redirect following enabled (reqwest default, up to 10 hops)
/// - Certificate validation disabled
///
/// Certificate trust is deliberately not validated: the prober detects
/// capabilities on arbitrary real-world hosts, many of which present
/// self-signed or otherwise invalid certificates, and rejecting those would
/// misreport their HTTPS support. The policy is set here, per client,
/// rather than through any process-wide toggle.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub async fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used for redirect inspection.
///
/// Creates a `reqwest::Client` with redirects disabled so a 3xx response is
/// returned verbatim, `Location` header included. The probe engine uses
/// this client for the plain-HTTP probe, where the question is not "where
/// does this page end up" but "does this host upgrade to HTTPS".
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub async fn init_redirect_client(
    config: &Config,
) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(Arc::new(client))
}
