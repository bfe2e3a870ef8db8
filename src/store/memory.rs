//! In-process store backend.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::DEFAULT_NAMESPACE;
use crate::error_handling::StoreError;

#[derive(Default)]
struct Namespace {
    values: HashMap<String, String>,
    queues: HashMap<String, VecDeque<String>>,
}

#[derive(Default)]
struct Shared {
    namespaces: HashMap<String, Namespace>,
}

/// In-memory [`JobStore`](super::JobStore) backend.
///
/// Handles are cheap to clone and all clones share the underlying data;
/// each handle tracks its own selected namespace, mirroring a
/// connection-scoped client. Locks are held only for the duration of a
/// single map operation, never across an await point.
pub struct MemoryStore {
    shared: Arc<Mutex<Shared>>,
    namespace: Mutex<String>,
}

impl MemoryStore {
    /// Creates an empty store with the default namespace selected.
    pub fn new() -> Self {
        MemoryStore {
            shared: Arc::new(Mutex::new(Shared::default())),
            namespace: Mutex::new(DEFAULT_NAMESPACE.to_string()),
        }
    }

    fn current_namespace(&self) -> Result<String, StoreError> {
        self.namespace
            .lock()
            .map(|ns| ns.clone())
            .map_err(|_| StoreError::Backend("namespace lock poisoned".to_string()))
    }

    fn with_namespace<T>(
        &self,
        f: impl FnOnce(&mut Namespace) -> T,
    ) -> Result<T, StoreError> {
        let namespace = self.current_namespace()?;
        let mut shared = self
            .shared
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        Ok(f(shared.namespaces.entry(namespace).or_default()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        let namespace = self
            .namespace
            .lock()
            .map(|ns| ns.clone())
            .unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());
        MemoryStore {
            shared: Arc::clone(&self.shared),
            namespace: Mutex::new(namespace),
        }
    }
}

#[async_trait]
impl super::JobStore for MemoryStore {
    async fn select(&self, namespace: &str) -> Result<(), StoreError> {
        let mut current = self
            .namespace
            .lock()
            .map_err(|_| StoreError::Backend("namespace lock poisoned".to_string()))?;
        *current = namespace.to_string();
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_namespace(|ns| ns.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_namespace(|ns| {
            ns.values.insert(key.to_string(), value.to_string());
        })
    }

    async fn push(&self, queue: &str, value: &str) -> Result<(), StoreError> {
        self.with_namespace(|ns| {
            ns.queues
                .entry(queue.to_string())
                .or_default()
                .push_back(value.to_string());
        })
    }

    async fn pop(&self, queue: &str) -> Result<Option<String>, StoreError> {
        self.with_namespace(|ns| ns.queues.get_mut(queue).and_then(|q| q.pop_front()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::JobStore;
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("example.com", "{}").await.unwrap();
        assert_eq!(store.get("example.com").await.unwrap(), Some("{}".into()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_queue_is_fifo() {
        let store = MemoryStore::new();
        store.push("jobs", "first").await.unwrap();
        store.push("jobs", "second").await.unwrap();
        assert_eq!(store.pop("jobs").await.unwrap(), Some("first".into()));
        assert_eq!(store.pop("jobs").await.unwrap(), Some("second".into()));
        assert_eq!(store.pop("jobs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pop_on_unknown_queue_is_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.pop("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = MemoryStore::new();
        store.select("alpha").await.unwrap();
        store.set("key", "alpha-value").await.unwrap();

        store.select("beta").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
        store.set("key", "beta-value").await.unwrap();

        store.select("alpha").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some("alpha-value".into()));
    }

    #[tokio::test]
    async fn test_clones_share_data_but_not_selection() {
        let store = MemoryStore::new();
        store.select("shared").await.unwrap();

        let other = store.clone();
        other.set("key", "value").await.unwrap();
        // Same namespace, same data.
        assert_eq!(store.get("key").await.unwrap(), Some("value".into()));

        // Re-selecting on one handle does not move the other.
        other.select("elsewhere").await.unwrap();
        assert_eq!(other.get("key").await.unwrap(), None);
        assert_eq!(store.get("key").await.unwrap(), Some("value".into()));
    }
}
