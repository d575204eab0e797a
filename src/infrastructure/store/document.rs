//! Typed JSON documents on top of a [`KvStore`].

use super::service::{KvStore, StoreResult};
use crate::error::AppError;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, warn};

/// A JSON document stored under one key, with a default used when the key is absent.
///
/// Reads through [`Document::load`] never fail: storage or parse errors are logged
/// and the default is returned. Mutations go through [`Document::update`], which
/// serializes read-modify-write cycles of this document within the process and
/// refuses to overwrite a document it could not read.
pub struct Document<T> {
    store: Arc<dyn KvStore>,
    key: &'static str,
    default: fn() -> T,
    lock: Mutex<()>,
}

impl<T> Document<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: Arc<dyn KvStore>, key: &'static str, default: fn() -> T) -> Self {
        Self {
            store,
            key,
            default,
            lock: Mutex::new(()),
        }
    }

    /// Reads the document, falling back to the default on any error.
    pub async fn load(&self) -> T {
        match self.try_load().await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = self.key, error = %e, "Failed to read document, using default");
                (self.default)()
            }
        }
    }

    /// Reads the document, propagating storage and parse errors.
    pub async fn try_load(&self) -> StoreResult<T> {
        match self.store.get(self.key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok((self.default)()),
        }
    }

    /// Replaces the document.
    pub async fn save(&self, value: &T) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        self.write(value).await
    }

    /// Applies `f` to the current value and saves the result.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn update<R, F>(&self, f: F) -> Result<R, AppError>
    where
        R: Send,
        F: FnOnce(&mut T) -> Result<R, AppError> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut value = self.try_load().await?;
        let out = f(&mut value)?;
        self.write(&value).await?;
        Ok(out)
    }

    /// Removes the document so the next read yields the default.
    pub async fn reset(&self) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        self.store.remove(self.key).await?;
        Ok(())
    }

    async fn write(&self, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value).map_err(|e| {
            error!(key = self.key, error = %e, "Failed to serialize document");
            AppError::internal(
                "Failed to serialize document",
                serde_json::json!({ "key": self.key }),
            )
        })?;
        self.store.set(self.key, &raw).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;
    use serde_json::json;

    fn doc(store: Arc<dyn KvStore>) -> Document<Vec<String>> {
        Document::new(store, "test_doc", || vec!["default".to_string()])
    }

    #[tokio::test]
    async fn test_missing_key_yields_default() {
        let d = doc(Arc::new(MemoryStore::new()));
        assert_eq!(d.load().await, vec!["default".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_on_load() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.set("test_doc", "{not json").await.unwrap();
        let d = doc(store);

        assert_eq!(d.load().await, vec!["default".to_string()]);
        assert!(d.try_load().await.is_err());
    }

    #[tokio::test]
    async fn test_update_refuses_to_overwrite_corrupt_document() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.set("test_doc", "{not json").await.unwrap();
        let d = doc(store.clone());

        let result = d
            .update(|v| {
                v.push("x".to_string());
                Ok(())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(
            store.get("test_doc").await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn test_update_persists_and_returns_value() {
        let d = doc(Arc::new(MemoryStore::new()));

        let len = d
            .update(|v| {
                v.push("second".to_string());
                Ok(v.len())
            })
            .await
            .unwrap();

        assert_eq!(len, 2);
        assert_eq!(d.load().await, vec!["default".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_update_does_not_write() {
        let d = doc(Arc::new(MemoryStore::new()));

        let result: Result<(), AppError> = d
            .update(|v| {
                v.clear();
                Err(AppError::bad_request("nope", json!({})))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(d.load().await, vec!["default".to_string()]);
    }

    #[tokio::test]
    async fn test_reset_restores_default() {
        let d = doc(Arc::new(MemoryStore::new()));
        d.save(&vec!["a".to_string()]).await.unwrap();
        d.reset().await.unwrap();
        assert_eq!(d.load().await, vec!["default".to_string()]);
    }
}
