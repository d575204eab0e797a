//! Key-value implementation of the package repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::WarehouseDocuments;
use crate::domain::entities::{Package, PackagePatch, PackageStatus};
use crate::domain::repositories::{PackageChange, PackageRepository};
use crate::error::AppError;

pub struct KvPackageRepository {
    docs: Arc<WarehouseDocuments>,
}

impl KvPackageRepository {
    pub fn new(docs: Arc<WarehouseDocuments>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl PackageRepository for KvPackageRepository {
    async fn list(&self) -> Vec<Package> {
        self.docs.packages.load().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Package>, AppError> {
        let packages = self.docs.packages.try_load().await?;
        Ok(packages.into_iter().find(|p| p.id == id))
    }

    async fn insert(&self, package: Package) -> Result<Package, AppError> {
        self.docs
            .packages
            .update(move |packages| {
                packages.insert(0, package.clone());
                Ok(package)
            })
            .await
    }

    async fn update(
        &self,
        id: &str,
        patch: PackagePatch,
    ) -> Result<Option<PackageChange>, AppError> {
        self.docs
            .packages
            .update(|packages| {
                let Some(package) = packages.iter_mut().find(|p| p.id == id) else {
                    return Ok(None);
                };
                let before = package.clone();
                patch.apply(package);
                Ok(Some((before, package.clone())))
            })
            .await
    }

    async fn set_status(
        &self,
        ids: &[String],
        status: PackageStatus,
    ) -> Result<Vec<PackageChange>, AppError> {
        self.docs
            .packages
            .update(|packages| {
                let changes = packages
                    .iter_mut()
                    .filter(|p| ids.contains(&p.id))
                    .map(|p| {
                        let before = p.clone();
                        p.status = status;
                        (before, p.clone())
                    })
                    .collect();
                Ok(changes)
            })
            .await
    }

    async fn claim_for_shipment(&self, ids: &[String]) -> Result<Vec<PackageChange>, AppError> {
        self.docs
            .packages
            .update(|packages| {
                let missing: Vec<&str> = ids
                    .iter()
                    .filter(|id| !packages.iter().any(|p| &p.id == *id))
                    .map(String::as_str)
                    .collect();
                if !missing.is_empty() {
                    return Err(AppError::not_found(
                        "Packages not found",
                        json!({ "ids": missing }),
                    ));
                }

                let unavailable: Vec<&str> = packages
                    .iter()
                    .filter(|p| ids.contains(&p.id) && !p.status.is_shippable())
                    .map(|p| p.id.as_str())
                    .collect();
                if !unavailable.is_empty() {
                    return Err(AppError::conflict(
                        "Packages are not available for shipment",
                        json!({ "ids": unavailable }),
                    ));
                }

                let mut changes = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(p) = packages.iter_mut().find(|p| &p.id == id) {
                        let before = p.clone();
                        p.status = PackageStatus::OutForDelivery;
                        changes.push((before, p.clone()));
                    }
                }
                Ok(changes)
            })
            .await
    }

    async fn delete(&self, ids: &[String]) -> Result<Vec<Package>, AppError> {
        self.docs
            .packages
            .update(|packages| {
                let (removed, kept): (Vec<_>, Vec<_>) =
                    packages.drain(..).partition(|p| ids.contains(&p.id));
                *packages = kept;
                Ok(removed)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;
    use chrono::Utc;

    fn repo() -> KvPackageRepository {
        let docs = WarehouseDocuments::new(Arc::new(MemoryStore::new()));
        KvPackageRepository::new(Arc::new(docs))
    }

    fn package(id: &str) -> Package {
        Package {
            id: id.to_string(),
            tracking_number: format!("TN-{}", id),
            owner: "Alice".to_string(),
            shelf: "A1".to_string(),
            tags: vec![],
            status: PackageStatus::InStock,
            entry_time: Utc::now(),
            weight: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_insert_puts_newest_first() {
        let repo = repo();
        repo.insert(package("a")).await.unwrap();
        repo.insert(package("b")).await.unwrap();

        let ids: Vec<_> = repo.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_update_returns_before_and_after() {
        let repo = repo();
        repo.insert(package("a")).await.unwrap();

        let (before, after) = repo
            .update("a", PackagePatch::status(PackageStatus::Delivered))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(before.status, PackageStatus::InStock);
        assert_eq!(after.status, PackageStatus::Delivered);
        assert!(repo.update("missing", PackagePatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_status_skips_unknown_ids() {
        let repo = repo();
        repo.insert(package("a")).await.unwrap();
        repo.insert(package("b")).await.unwrap();

        let changes = repo
            .set_status(&["a".to_string(), "zzz".to_string()], PackageStatus::Pending)
            .await
            .unwrap();

        assert_eq!(changes.len(), 1);
        let stored = repo.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(stored.status, PackageStatus::Pending);
    }

    #[tokio::test]
    async fn test_claim_for_shipment_is_all_or_nothing() {
        let repo = repo();
        repo.insert(package("a")).await.unwrap();
        let mut shipped = package("b");
        shipped.status = PackageStatus::Delivered;
        repo.insert(shipped).await.unwrap();

        let err = repo
            .claim_for_shipment(&["a".to_string(), "b".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        let err = repo
            .claim_for_shipment(&["a".to_string(), "zzz".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        let a = repo.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(a.status, PackageStatus::InStock);

        let changes = repo.claim_for_shipment(&["a".to_string()]).await.unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].1.status, PackageStatus::OutForDelivery);

        let err = repo
            .claim_for_shipment(&["a".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_keeps_order_of_remaining() {
        let repo = repo();
        for id in ["a", "b", "c"] {
            repo.insert(package(id)).await.unwrap();
        }

        let removed = repo.delete(&["b".to_string()]).await.unwrap();
        assert_eq!(removed.len(), 1);

        let ids: Vec<_> = repo.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }
}
