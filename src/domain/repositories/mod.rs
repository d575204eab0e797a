//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. They are
//! implemented over the key-value store in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`PackageRepository`] - Package records
//! - [`ShipmentRepository`] - Shipments
//! - [`ShelfRepository`] - Shelves and occupancy counters
//! - [`PriceChannelRepository`] - Price table and fuel surcharges
//! - [`PresetRepository`] - Owners, tags, status labels, last entry, settings
//! - [`BackupRepository`] - Whole-store snapshot, restore and clear
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! Mock implementations are generated with `mockall` under `cfg(test)`.

pub mod backup_repository;
pub mod package_repository;
pub mod preset_repository;
pub mod price_channel_repository;
pub mod shelf_repository;
pub mod shipment_repository;
pub mod token_repository;

pub use backup_repository::BackupRepository;
pub use package_repository::{PackageChange, PackageRepository};
pub use preset_repository::PresetRepository;
pub use price_channel_repository::PriceChannelRepository;
pub use shelf_repository::ShelfRepository;
pub use shipment_repository::ShipmentRepository;
pub use token_repository::TokenRepository;

#[cfg(test)]
pub use backup_repository::MockBackupRepository;
#[cfg(test)]
pub use package_repository::MockPackageRepository;
#[cfg(test)]
pub use preset_repository::MockPresetRepository;
#[cfg(test)]
pub use price_channel_repository::MockPriceChannelRepository;
#[cfg(test)]
pub use shelf_repository::MockShelfRepository;
#[cfg(test)]
pub use shipment_repository::MockShipmentRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
