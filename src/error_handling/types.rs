//! Error type definitions.
//!
//! This module defines the typed errors used throughout the application and
//! the categories tracked by the processing statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Contract violations in job input.
///
/// This is the one error class a probe job is allowed to fail with: it
/// indicates a caller bug, not an environmental condition. Every network or
/// content failure instead resolves to a fully populated (possibly
/// all-false) capability record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The job carried no hostname at all.
    #[error("job has an empty title")]
    EmptyTitle,

    /// The job title is not a bare `host` or `host:port`.
    #[error("job title is not a valid host or host:port: {0:?}")]
    InvalidTitle(String),
}

/// Errors surfaced by a job store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend failed to serve the request.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Categories of fetch-level failures tracked during probing.
///
/// These count degraded evidence, not job failures: a fetch that lands in
/// one of these buckets simply contributes no capability evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Connection-level failure (DNS, refused, reset, TLS handshake).
    FetchConnectError,
    /// The fetch timed out.
    FetchTimeoutError,
    /// The response body could not be decoded.
    FetchDecodeError,
    /// Any other request failure.
    FetchRequestError,
    /// A response body exceeded the size cap and was dropped.
    OversizedBody,
    /// A job title failed contract validation.
    InvalidJobTitle,
    /// A store operation failed.
    StoreFailure,
}

/// Capability detections and other notable non-error events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// The secure endpoint answered.
    SecureEndpoint,
    /// A Strict-Transport-Security header was seen.
    Hsts,
    /// The plain endpoint redirected to HTTPS.
    HttpsRedirect,
    /// A manifest link was found on the secure page.
    Manifest,
    /// A linked script registers a service worker.
    ServiceWorker,
    /// A linked script subscribes to push notifications.
    PushSubscription,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::FetchConnectError => "Fetch connect error",
            ErrorType::FetchTimeoutError => "Fetch timeout",
            ErrorType::FetchDecodeError => "Fetch decode error",
            ErrorType::FetchRequestError => "Fetch request error",
            ErrorType::OversizedBody => "Oversized body dropped",
            ErrorType::InvalidJobTitle => "Invalid job title",
            ErrorType::StoreFailure => "Store failure",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::SecureEndpoint => "Secure endpoint reachable",
            InfoType::Hsts => "HSTS header present",
            InfoType::HttpsRedirect => "HTTP to HTTPS redirect",
            InfoType::Manifest => "Manifest link found",
            InfoType::ServiceWorker => "Service worker registration",
            InfoType::PushSubscription => "Push subscription",
        }
    }
}
