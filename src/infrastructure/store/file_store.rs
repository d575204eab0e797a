//! File-backed store: one JSON file per key.

use super::service::{KvStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores each key as `<data_dir>/<key>.json`.
///
/// Writes go to a temporary sibling file first and are renamed into place,
/// so a crash mid-write never leaves a truncated document behind.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (and creates, if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub async fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        info!("File store at {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Operation(format!("invalid storage key '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(key, bytes = value.len(), "File store write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> bool {
        tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        assert!(store.get("warehouse_tags").await.unwrap().is_none());

        store.set("warehouse_tags", r#"["fragile"]"#).await.unwrap();
        assert!(dir.path().join("warehouse_tags.json").exists());
        assert_eq!(
            store.get("warehouse_tags").await.unwrap().as_deref(),
            Some(r#"["fragile"]"#)
        );

        store.remove("warehouse_tags").await.unwrap();
        assert!(store.get("warehouse_tags").await.unwrap().is_none());
        store.remove("warehouse_tags").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        assert!(store.get("../etc/passwd").await.is_err());
        assert!(store.set("a/b", "x").await.is_err());
        assert!(store.get("").await.is_err());
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let store = FileStore::open(&nested).await.unwrap();

        assert!(store.health_check().await);
        assert_eq!(store.backend(), "file");
    }
}
