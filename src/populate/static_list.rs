//! Static-list population backend.

use async_trait::async_trait;

use crate::config::POPULATE_BATCH_SIZE;

use super::{PopulateOptions, PopulationBackend};

/// Default hosts probed when no explicit list is configured.
const DEFAULT_HOSTS: &[&str] = &[
    "google.com",
    "yahoo.com",
    "bing.com",
    "duckduckgo.com",
    "eff.org",
    "mozilla.org",
    "mozilla.com",
    "stubhub.com",
    "houstonchronicle.com",
    "caron.com",
    "mysa.com",
    "expressnews.com",
    "younow.com",
    "weather.com",
    "hubspot.com",
    "nestle.com",
    "cbsnews.com",
    "facebook.com",
    "pinterest.com",
];

/// Population backend over a fixed host list.
///
/// Ships a built-in default list; `configure` swaps in an explicit one.
/// The cursor lives on the instance, so independent runs never share
/// iteration state.
pub struct StaticList {
    hosts: Vec<String>,
    cursor: usize,
}

impl StaticList {
    /// Creates a backend over the built-in default host list.
    pub fn new() -> Self {
        StaticList {
            hosts: DEFAULT_HOSTS.iter().map(|h| h.to_string()).collect(),
            cursor: 0,
        }
    }
}

impl Default for StaticList {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PopulationBackend for StaticList {
    async fn configure(&mut self, options: PopulateOptions) -> anyhow::Result<()> {
        if let Some(hosts) = options.hosts {
            self.hosts = hosts;
            self.cursor = 0;
        }
        Ok(())
    }

    fn next_batch(&mut self) -> Option<Vec<String>> {
        if self.cursor >= self.hosts.len() {
            return None;
        }
        let end = usize::min(self.cursor + POPULATE_BATCH_SIZE, self.hosts.len());
        let batch = self.hosts[self.cursor..end].to_vec();
        self.cursor = end;
        Some(batch)
    }
}
