//! Key-value implementation of the preset repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::WarehouseDocuments;
use crate::domain::entities::preset::default_statuses;
use crate::domain::entities::{LastEntry, PackageStatus, PresetList, StatusLabel, SystemSettings};
use crate::domain::repositories::PresetRepository;
use crate::error::AppError;
use crate::infrastructure::store::Document;

pub struct KvPresetRepository {
    docs: Arc<WarehouseDocuments>,
}

impl KvPresetRepository {
    pub fn new(docs: Arc<WarehouseDocuments>) -> Self {
        Self { docs }
    }

    fn doc(&self, list: PresetList) -> &Document<Vec<String>> {
        match list {
            PresetList::Owners => &self.docs.owners,
            PresetList::Tags => &self.docs.tags,
        }
    }
}

#[async_trait]
impl PresetRepository for KvPresetRepository {
    async fn list(&self, list: PresetList) -> Vec<String> {
        self.doc(list).load().await
    }

    async fn add(&self, list: PresetList, value: String) -> Result<Vec<String>, AppError> {
        self.doc(list)
            .update(move |values| {
                if values.contains(&value) {
                    return Err(AppError::conflict(
                        "Preset already exists",
                        json!({ "list": list.as_str(), "value": value }),
                    ));
                }
                values.push(value);
                Ok(values.clone())
            })
            .await
    }

    async fn remove(&self, list: PresetList, value: String) -> Result<bool, AppError> {
        self.doc(list)
            .update(move |values| {
                let before = values.len();
                values.retain(|v| *v != value);
                Ok(values.len() != before)
            })
            .await
    }

    async fn statuses(&self) -> Vec<StatusLabel> {
        self.docs.statuses.load().await
    }

    async fn set_status_label(
        &self,
        status: PackageStatus,
        label: String,
    ) -> Result<Vec<StatusLabel>, AppError> {
        self.docs
            .statuses
            .update(move |labels| {
                match labels.iter_mut().find(|l| l.value == status) {
                    Some(existing) => existing.label = label,
                    None => labels.push(StatusLabel {
                        value: status,
                        label,
                    }),
                }
                Ok(labels.clone())
            })
            .await
    }

    async fn reset_statuses(&self) -> Result<Vec<StatusLabel>, AppError> {
        self.docs.statuses.reset().await?;
        Ok(default_statuses())
    }

    async fn last_entry(&self) -> LastEntry {
        self.docs.last_entry.load().await
    }

    async fn save_last_entry(&self, entry: LastEntry) -> Result<(), AppError> {
        self.docs.last_entry.save(&entry).await
    }

    async fn settings(&self) -> SystemSettings {
        self.docs.settings.load().await
    }

    async fn save_settings(&self, settings: SystemSettings) -> Result<SystemSettings, AppError> {
        self.docs.settings.save(&settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;

    fn repo() -> KvPresetRepository {
        let docs = WarehouseDocuments::new(Arc::new(MemoryStore::new()));
        KvPresetRepository::new(Arc::new(docs))
    }

    #[tokio::test]
    async fn test_add_and_remove_owner() {
        let repo = repo();
        let owners = repo
            .add(PresetList::Owners, "Alice".to_string())
            .await
            .unwrap();
        assert_eq!(owners.last().map(String::as_str), Some("Alice"));

        let err = repo
            .add(PresetList::Owners, "Alice".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        assert!(repo.remove(PresetList::Owners, "Alice".to_string()).await.unwrap());
        assert!(!repo.remove(PresetList::Owners, "Alice".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_lists_are_independent() {
        let repo = repo();
        repo.add(PresetList::Tags, "cold".to_string()).await.unwrap();

        assert!(repo.list(PresetList::Tags).await.contains(&"cold".to_string()));
        assert!(!repo.list(PresetList::Owners).await.contains(&"cold".to_string()));
    }

    #[tokio::test]
    async fn test_status_labels_set_and_reset() {
        let repo = repo();
        let labels = repo
            .set_status_label(PackageStatus::InStock, "On shelf".to_string())
            .await
            .unwrap();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0].label, "On shelf");

        let labels = repo.reset_statuses().await.unwrap();
        assert_eq!(labels[0].label, "Inbound");
        assert_eq!(repo.statuses().await[0].label, "Inbound");
    }

    #[tokio::test]
    async fn test_last_entry_and_settings_roundtrip_storage() {
        let repo = repo();
        assert_eq!(repo.last_entry().await, LastEntry::default());

        let entry = LastEntry {
            owner: Some("Bob".to_string()),
            shelf: Some("B1".to_string()),
            tags: vec!["fragile".to_string()],
            status: Some(PackageStatus::InStock),
        };
        repo.save_last_entry(entry.clone()).await.unwrap();
        assert_eq!(repo.last_entry().await, entry);

        let mut settings = repo.settings().await;
        settings.low_stock_threshold = 3;
        repo.save_settings(settings).await.unwrap();
        assert_eq!(repo.settings().await.low_stock_threshold, 3);
    }
}
