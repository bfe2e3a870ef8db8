//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a
//! probe run: the two HTTP clients, the logger, and the concurrency
//! semaphore. All initialization functions return proper error types.

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

pub use client::{init_client, init_redirect_client};
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// The semaphore limits the number of probe jobs running at once; permits
/// are acquired by the run loop before spawning a job.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
