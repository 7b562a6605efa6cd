//! Persistent key-value storage port.

use async_trait::async_trait;

use crate::result::AppResult;

/// String key-value store injected into plugins that persist UI state.
///
/// Implementations exist for memory and the local filesystem; a host may
/// back it with anything that offers get/set/remove by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Missing keys are not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
