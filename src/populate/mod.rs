//! Job population backends.
//!
//! A population backend is a source of hostnames to probe. Backends are
//! plain batch iterators: `next_batch` hands the caller 1-2 hostnames at a
//! time until the source is exhausted. Pacing belongs to the caller — the
//! run loop owns the interval timer, the backend owns no clock and no
//! global cursor.

mod static_list;

use async_trait::async_trait;

pub use static_list::StaticList;

/// Runtime options applied to a backend before iteration starts.
#[derive(Debug, Clone, Default)]
pub struct PopulateOptions {
    /// Explicit host list to probe instead of the backend's default source.
    pub hosts: Option<Vec<String>>,
}

/// A source of probe jobs.
#[async_trait]
pub trait PopulationBackend: Send {
    /// Applies runtime parameters. Called once, before the first
    /// `next_batch`.
    async fn configure(&mut self, options: PopulateOptions) -> anyhow::Result<()>;

    /// Returns the next batch of hostnames, or `None` once the source is
    /// exhausted. Exhaustion is final: every later call also returns
    /// `None`.
    fn next_batch(&mut self) -> Option<Vec<String>>;
}
