//! Key-value repository implementations.
//!
//! Concrete implementations of the domain repository traits over
//! [`WarehouseDocuments`], one typed JSON document per collection.
//!
//! # Repositories
//!
//! - [`KvPackageRepository`] - Package records
//! - [`KvShipmentRepository`] - Shipments
//! - [`KvShelfRepository`] - Shelves and occupancy counters
//! - [`KvPriceChannelRepository`] - Price table and fuel surcharges
//! - [`KvPresetRepository`] - Presets, last entry and settings
//! - [`KvBackupRepository`] - Snapshot, restore and clear
//! - [`KvTokenRepository`] - API token storage and validation

mod documents;
pub mod kv_backup_repository;
pub mod kv_package_repository;
pub mod kv_preset_repository;
pub mod kv_price_channel_repository;
pub mod kv_shelf_repository;
pub mod kv_shipment_repository;
pub mod kv_token_repository;

pub use documents::WarehouseDocuments;
pub use kv_backup_repository::KvBackupRepository;
pub use kv_package_repository::KvPackageRepository;
pub use kv_preset_repository::KvPresetRepository;
pub use kv_price_channel_repository::KvPriceChannelRepository;
pub use kv_shelf_repository::KvShelfRepository;
pub use kv_shipment_repository::KvShipmentRepository;
pub use kv_token_repository::KvTokenRepository;
