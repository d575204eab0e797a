//! Business logic services for the application layer.
//!
//! Services are generic over the repository traits so handlers run against the
//! key-value repositories and unit tests against mockall mocks.

pub mod auth_service;
pub mod backup_service;
pub mod dashboard_service;
mod occupancy;
pub mod package_service;
pub mod preset_service;
pub mod pricing_service;
pub mod shelf_service;
pub mod shipment_service;
pub mod tracking_service;

pub use auth_service::AuthService;
pub use backup_service::{BackupExport, BackupService, run_backup_worker};
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use package_service::PackageService;
pub use preset_service::PresetService;
pub use pricing_service::PricingService;
pub use shelf_service::ShelfService;
pub use shipment_service::ShipmentService;
pub use tracking_service::{CarrierGuess, TrackingLookup, TrackingService};
