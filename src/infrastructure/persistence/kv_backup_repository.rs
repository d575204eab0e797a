//! Key-value implementation of the backup repository.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::WarehouseDocuments;
use crate::domain::entities::BackupSnapshot;
use crate::domain::repositories::BackupRepository;
use crate::error::AppError;
use crate::infrastructure::store::keys;

pub struct KvBackupRepository {
    docs: Arc<WarehouseDocuments>,
}

impl KvBackupRepository {
    pub fn new(docs: Arc<WarehouseDocuments>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl BackupRepository for KvBackupRepository {
    async fn snapshot(&self) -> Result<BackupSnapshot, AppError> {
        let d = &self.docs;
        Ok(BackupSnapshot {
            exported_at: None,
            packages: Some(d.packages.try_load().await?),
            shipments: Some(d.shipments.try_load().await?),
            shelves: Some(d.shelves.try_load().await?),
            owners: Some(d.owners.try_load().await?),
            tags: Some(d.tags.try_load().await?),
            statuses: Some(d.statuses.try_load().await?),
            price_channels: Some(d.price_channels.try_load().await?),
            fuel_surcharges: Some(d.fuel_surcharges.try_load().await?),
            last_entry: Some(d.last_entry.try_load().await?),
            settings: Some(d.settings.try_load().await?),
        })
    }

    async fn restore(&self, snapshot: BackupSnapshot) -> Result<Vec<&'static str>, AppError> {
        let sections = snapshot.sections();
        let d = &self.docs;

        if let Some(v) = snapshot.packages {
            d.packages.save(&v).await?;
        }
        if let Some(v) = snapshot.shipments {
            d.shipments.save(&v).await?;
        }
        if let Some(v) = snapshot.shelves {
            d.shelves.save(&v).await?;
        }
        if let Some(v) = snapshot.owners {
            d.owners.save(&v).await?;
        }
        if let Some(v) = snapshot.tags {
            d.tags.save(&v).await?;
        }
        if let Some(v) = snapshot.statuses {
            d.statuses.save(&v).await?;
        }
        if let Some(v) = snapshot.price_channels {
            d.price_channels.save(&v).await?;
        }
        if let Some(v) = snapshot.fuel_surcharges {
            d.fuel_surcharges.save(&v).await?;
        }
        if let Some(v) = snapshot.last_entry {
            d.last_entry.save(&v).await?;
        }
        if let Some(v) = snapshot.settings {
            d.settings.save(&v).await?;
        }

        Ok(sections)
    }

    async fn clear(&self) -> Result<(), AppError> {
        let d = &self.docs;
        d.packages.reset().await?;
        d.shipments.reset().await?;
        d.shelves.reset().await?;
        d.owners.reset().await?;
        d.tags.reset().await?;
        d.statuses.reset().await?;
        d.price_channels.reset().await?;
        d.fuel_surcharges.reset().await?;
        d.last_entry.reset().await?;
        d.settings.reset().await?;

        info!(keys = keys::DATA_KEYS.len(), "Warehouse data cleared");
        Ok(())
    }
}
