//! Key-value store trait and error types.

use async_trait::async_trait;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage connection error: {0}")]
    Connection(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage operation error: {0}")]
    Operation(String),

    #[error("Stored document is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// String key-value storage, the server-side stand-in for browser `localStorage`.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryStore`]
/// - [`crate::infrastructure::store::FileStore`]
/// - [`crate::infrastructure::store::RedisStore`]
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the raw value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;
}
