//! Queue/store collaborator interface.
//!
//! The probe core distributes jobs and records results through an opaque
//! key-value and queue service. The core depends only on the semantics
//! below — namespace selection, string get/set, and FIFO push/pop — never
//! on a particular wire protocol or backend.

mod memory;

use async_trait::async_trait;

pub use memory::MemoryStore;

use crate::error_handling::StoreError;

/// A connection-scoped job store client.
///
/// `select` scopes all subsequent operations on this handle to a
/// namespace, mirroring a connection-level database selection; handles
/// backed by the same store but selected into different namespaces do not
/// see each other's data.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Scopes this handle to a namespace.
    async fn select(&self, namespace: &str) -> Result<(), StoreError>;

    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Appends `value` to the tail of `queue`.
    async fn push(&self, queue: &str, value: &str) -> Result<(), StoreError>;

    /// Removes and returns the head of `queue`, or `None` when empty.
    async fn pop(&self, queue: &str) -> Result<Option<String>, StoreError>;
}
