//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AuthService, BackupService, DashboardService, PackageService, PresetService, PricingService,
    ShelfService, ShipmentService, TrackingService,
};
use crate::infrastructure::persistence::{
    KvBackupRepository, KvPackageRepository, KvPresetRepository, KvPriceChannelRepository,
    KvShelfRepository, KvShipmentRepository, KvTokenRepository, WarehouseDocuments,
};
use crate::infrastructure::store::KvStore;
use crate::infrastructure::tracking::TrackingProvider;

pub type AppPackageService =
    PackageService<KvPackageRepository, KvShelfRepository, KvPresetRepository>;
pub type AppShipmentService =
    ShipmentService<KvShipmentRepository, KvPackageRepository, KvShelfRepository>;
pub type AppShelfService = ShelfService<KvShelfRepository, KvPackageRepository>;
pub type AppPricingService = PricingService<KvPriceChannelRepository>;
pub type AppTrackingService = TrackingService<KvPackageRepository>;
pub type AppPresetService = PresetService<KvPresetRepository>;
pub type AppBackupService = BackupService<KvBackupRepository>;
pub type AppDashboardService = DashboardService<
    KvPackageRepository,
    KvShipmentRepository,
    KvShelfRepository,
    KvPresetRepository,
>;
pub type AppAuthService = AuthService<KvTokenRepository>;

/// How tracking lookups are answered.
pub struct TrackingOptions {
    /// Queried in order; the first answer wins.
    pub providers: Vec<Arc<dyn TrackingProvider>>,
    pub demo_fallback: bool,
    pub max_retries: usize,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            demo_fallback: true,
            max_retries: 0,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub package_service: Arc<AppPackageService>,
    pub shipment_service: Arc<AppShipmentService>,
    pub shelf_service: Arc<AppShelfService>,
    pub pricing_service: Arc<AppPricingService>,
    pub tracking_service: Arc<AppTrackingService>,
    pub preset_service: Arc<AppPresetService>,
    pub backup_service: Arc<AppBackupService>,
    pub dashboard_service: Arc<AppDashboardService>,
    pub auth_service: Arc<AppAuthService>,
    pub store: Arc<dyn KvStore>,
    /// Provider names in query order, reported by the health check.
    pub tracking_providers: Vec<&'static str>,
}

impl AppState {
    /// Wires every repository and service over one store.
    pub fn new(store: Arc<dyn KvStore>, signing_secret: String, tracking: TrackingOptions) -> Self {
        let docs = Arc::new(WarehouseDocuments::new(store.clone()));

        let packages = Arc::new(KvPackageRepository::new(docs.clone()));
        let shipments = Arc::new(KvShipmentRepository::new(docs.clone()));
        let shelves = Arc::new(KvShelfRepository::new(docs.clone()));
        let channels = Arc::new(KvPriceChannelRepository::new(docs.clone()));
        let presets = Arc::new(KvPresetRepository::new(docs.clone()));
        let backups = Arc::new(KvBackupRepository::new(docs.clone()));
        let tokens = Arc::new(KvTokenRepository::new(docs));

        let tracking_providers = tracking.providers.iter().map(|p| p.name()).collect();

        Self {
            package_service: Arc::new(PackageService::new(
                packages.clone(),
                shelves.clone(),
                presets.clone(),
            )),
            shipment_service: Arc::new(ShipmentService::new(
                shipments.clone(),
                packages.clone(),
                shelves.clone(),
            )),
            shelf_service: Arc::new(ShelfService::new(shelves.clone(), packages.clone())),
            pricing_service: Arc::new(PricingService::new(channels)),
            tracking_service: Arc::new(TrackingService::new(
                tracking.providers,
                tracking.demo_fallback,
                tracking.max_retries,
                packages.clone(),
            )),
            preset_service: Arc::new(PresetService::new(presets.clone())),
            backup_service: Arc::new(BackupService::new(backups)),
            dashboard_service: Arc::new(DashboardService::new(
                packages, shipments, shelves, presets,
            )),
            auth_service: Arc::new(AuthService::new(tokens, signing_secret)),
            store,
            tracking_providers,
        }
    }
}
