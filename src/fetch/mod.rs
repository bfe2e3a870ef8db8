//! Resource fetching with failure containment.
//!
//! The fetcher performs one GET and always resolves to a [`FetchOutcome`]:
//! either a received response (status, headers, decoded body) or a failure
//! marker with a coarse reason. Nothing environmental escapes as an `Err` —
//! downstream probe logic treats a failure outcome as "no evidence", never
//! as a job failure.

use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::ErrorType;

/// A response that arrived, whatever its status code.
#[derive(Debug)]
pub struct FetchedResponse {
    /// HTTP status of the (final, post-redirect) response.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Decoded body text. Empty when the body was undecodable or oversized;
    /// status and headers are still meaningful in that case.
    pub body: String,
    /// URL the response was ultimately served from.
    pub final_url: Url,
}

/// Coarse classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection-level failure: DNS, refused/reset, TLS handshake.
    Connect,
    /// The request timed out.
    Timeout,
    /// The response could not be decoded before any body text was read.
    Decode,
    /// Anything else reqwest reports about the request itself.
    Request,
}

impl FailureKind {
    /// Maps the failure kind onto its statistics category.
    pub fn error_type(&self) -> ErrorType {
        match self {
            FailureKind::Connect => ErrorType::FetchConnectError,
            FailureKind::Timeout => ErrorType::FetchTimeoutError,
            FailureKind::Decode => ErrorType::FetchDecodeError,
            FailureKind::Request => ErrorType::FetchRequestError,
        }
    }
}

/// A fetch that produced no response at all.
#[derive(Debug)]
pub struct FetchFailure {
    /// Why the fetch failed.
    pub kind: FailureKind,
    /// Human-readable detail, for logs only.
    pub message: String,
}

/// Total result of a single fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered; any status code counts.
    Response(FetchedResponse),
    /// Transport-level failure; carries no body and no headers.
    Failed(FetchFailure),
}

impl FetchOutcome {
    /// The received response, if the fetch produced one.
    pub fn response(&self) -> Option<&FetchedResponse> {
        match self {
            FetchOutcome::Response(response) => Some(response),
            FetchOutcome::Failed(_) => None,
        }
    }

    /// Whether the fetch produced a response.
    pub fn is_response(&self) -> bool {
        matches!(self, FetchOutcome::Response(_))
    }
}

/// Categorizes a `reqwest::Error` into a [`FailureKind`].
pub fn categorize_fetch_failure(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connect
    } else if error.is_decode() || error.is_body() {
        FailureKind::Decode
    } else {
        FailureKind::Request
    }
}

/// Performs a single GET against `url` and resolves to a [`FetchOutcome`].
///
/// Redirect behavior is whatever the supplied client was built with: the
/// probe engine passes its no-redirect client when it wants 3xx responses
/// back verbatim and its following client otherwise.
///
/// Body handling: reqwest decompresses gzip/deflate/brotli transparently
/// while reading. If that read fails (corrupt or truncated stream), or the
/// body exceeds [`MAX_RESPONSE_BODY_SIZE`], the outcome is still a
/// response — with an empty body and the original status and headers
/// preserved. A server that mangles its content encoding has still
/// answered, and its headers are still evidence.
pub async fn fetch_resource(client: &reqwest::Client, url: &Url) -> FetchOutcome {
    debug!("Fetching {url}");

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let kind = categorize_fetch_failure(&e);
            debug!("Fetch failed for {url}: {e}");
            return FetchOutcome::Failed(FetchFailure {
                kind,
                message: e.to_string(),
            });
        }
    };

    let status = response.status();
    let headers = response.headers().clone();
    let final_url = response.url().clone();

    let body = match response.text().await {
        Ok(text) if text.len() > MAX_RESPONSE_BODY_SIZE => {
            debug!(
                "Dropping oversized body for {final_url}: {} bytes",
                text.len()
            );
            String::new()
        }
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to read response body for {final_url}: {e}");
            String::new()
        }
    };

    FetchOutcome::Response(FetchedResponse {
        status,
        headers,
        body,
        final_url,
    })
}
