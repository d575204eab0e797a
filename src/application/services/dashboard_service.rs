//! Aggregated warehouse overview.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::{PackageStatus, Shelf, ShipmentStatus};
use crate::domain::repositories::{
    PackageRepository, PresetRepository, ShelfRepository, ShipmentRepository,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_packages: usize,
    pub in_stock: usize,
    pub out_for_delivery: usize,
    pub delivered: usize,
    pub total_shipments: usize,
    pub pending_shipments: usize,
    /// Shelves at or below the low-stock threshold; empty when alerts are off.
    pub shelf_alerts: Vec<Shelf>,
}

pub struct DashboardService<P, S, H, R>
where
    P: PackageRepository,
    S: ShipmentRepository,
    H: ShelfRepository,
    R: PresetRepository,
{
    packages: Arc<P>,
    shipments: Arc<S>,
    shelves: Arc<H>,
    presets: Arc<R>,
}

impl<P, S, H, R> DashboardService<P, S, H, R>
where
    P: PackageRepository,
    S: ShipmentRepository,
    H: ShelfRepository,
    R: PresetRepository,
{
    pub fn new(packages: Arc<P>, shipments: Arc<S>, shelves: Arc<H>, presets: Arc<R>) -> Self {
        Self {
            packages,
            shipments,
            shelves,
            presets,
        }
    }

    pub async fn summary(&self) -> DashboardSummary {
        let packages = self.packages.list().await;
        let shipments = self.shipments.list().await;
        let settings = self.presets.settings().await;

        let count = |status: PackageStatus| packages.iter().filter(|p| p.status == status).count();

        let shelf_alerts = if settings.low_stock_alert {
            self.shelves
                .list()
                .await
                .into_iter()
                .filter(|s| s.free_capacity() <= settings.low_stock_threshold)
                .collect()
        } else {
            Vec::new()
        };

        DashboardSummary {
            total_packages: packages.len(),
            in_stock: count(PackageStatus::InStock),
            out_for_delivery: count(PackageStatus::OutForDelivery),
            delivered: count(PackageStatus::Delivered),
            total_shipments: shipments.len(),
            pending_shipments: shipments
                .iter()
                .filter(|s| s.status == ShipmentStatus::Pending)
                .count(),
            shelf_alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::shelf::default_shelves;
    use crate::domain::entities::{Package, SystemSettings};
    use crate::domain::repositories::{
        MockPackageRepository, MockPresetRepository, MockShelfRepository, MockShipmentRepository,
    };
    use chrono::Utc;

    fn package(status: PackageStatus) -> Package {
        Package {
            id: "p".to_string(),
            tracking_number: "TN".to_string(),
            owner: String::new(),
            shelf: "A1".to_string(),
            tags: vec![],
            status,
            entry_time: Utc::now(),
            weight: None,
            notes: None,
        }
    }

    fn shelves_with_nearly_full_a1() -> Vec<Shelf> {
        let mut shelves = default_shelves();
        shelves[0].current_count = 95;
        shelves
    }

    fn service(settings: SystemSettings, expect_shelves: bool) -> DashboardService<
        MockPackageRepository,
        MockShipmentRepository,
        MockShelfRepository,
        MockPresetRepository,
    > {
        let mut packages = MockPackageRepository::new();
        packages.expect_list().returning(|| {
            vec![
                package(PackageStatus::InStock),
                package(PackageStatus::InStock),
                package(PackageStatus::OutForDelivery),
                package(PackageStatus::Delivered),
                package(PackageStatus::Signed),
            ]
        });
        let mut shipments = MockShipmentRepository::new();
        shipments.expect_list().returning(Vec::new);
        let mut shelves = MockShelfRepository::new();
        if expect_shelves {
            shelves.expect_list().returning(shelves_with_nearly_full_a1);
        } else {
            shelves.expect_list().never();
        }
        let mut presets = MockPresetRepository::new();
        presets.expect_settings().returning(move || settings.clone());

        DashboardService::new(
            Arc::new(packages),
            Arc::new(shipments),
            Arc::new(shelves),
            Arc::new(presets),
        )
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let summary = service(SystemSettings::default(), true).summary().await;

        assert_eq!(summary.total_packages, 5);
        assert_eq!(summary.in_stock, 2);
        assert_eq!(summary.out_for_delivery, 1);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.total_shipments, 0);
        assert_eq!(summary.shelf_alerts.len(), 1);
        assert_eq!(summary.shelf_alerts[0].name, "A1");
    }

    #[tokio::test]
    async fn test_alerts_off() {
        let settings = SystemSettings {
            low_stock_alert: false,
            ..Default::default()
        };
        let summary = service(settings, false).summary().await;
        assert!(summary.shelf_alerts.is_empty());
    }
}
