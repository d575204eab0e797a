//! Core domain entities representing the warehouse data model.
//!
//! Entities are flat records serialized as camelCase JSON, the same shape the
//! documents in the key-value store have.
//!
//! # Entity Types
//!
//! - [`Package`] - A tracked parcel on a shelf
//! - [`Shipment`] - A batch of packages sent to one recipient
//! - [`Shelf`] - A storage slot with capacity and occupancy
//! - [`PriceChannel`] - A carrier/country rate rule
//! - [`TrackingResult`] - Normalized third-party tracking data
//! - [`ApiToken`] - Hashed API credential
//! - [`BackupSnapshot`] - Export/import envelope of all collections
//!
//! Creation inputs use separate structs (`NewPackage`, `NewShelf`, ...) and partial
//! updates use `*Patch` structs where `None` means "leave unchanged".

pub mod api_token;
pub mod backup;
pub mod package;
pub mod preset;
pub mod price_channel;
pub mod shelf;
pub mod shipment;
pub mod tracking;

pub use api_token::ApiToken;
pub use backup::BackupSnapshot;
pub use package::{
    LastEntry, NewPackage, Package, PackageFilter, PackagePatch, PackageStatus,
};
pub use preset::{BackupFrequency, PresetList, StatusLabel, SystemSettings};
pub use price_channel::{BillingMethod, FuelSurcharge, PriceChannel, WeightRange, WeightTier};
pub use shelf::{NewShelf, Shelf, ShelfPatch};
pub use shipment::{Recipient, Shipment, ShipmentStatus};
pub use tracking::{Carrier, EventStatus, TrackingEvent, TrackingResult, TrackingStatus};
