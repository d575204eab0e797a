//! # Parcel Depot
//!
//! Back office service for a small parcel-forwarding warehouse, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the rate calculator and repository traits
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value storage and tracking providers
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Package intake, filtering, batch updates and CSV export
//! - Outbound shipments with forward-only status transitions
//! - Shelf occupancy counters with low-stock alerts
//! - Rate calculator over configurable price channels and fuel surcharges
//! - Carrier tracking via 17track / AfterShip with retry and a demo fallback
//! - JSON backup, restore and scheduled auto-backup
//! - File, in-memory or Redis storage
//! - API token authentication, rate limiting and structured logging
//!
//! ## Quick Start
//!
//! ```bash
//! export TOKEN_SIGNING_SECRET="change-me"
//! export STORAGE_BACKEND=file DATA_DIR=./data
//!
//! # Issue an API token
//! cargo run --bin depot-admin -- token create ops
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, BackupService, DashboardService, PackageService, PricingService,
        ShelfService, ShipmentService, TrackingService,
    };
    pub use crate::domain::entities::{
        NewPackage, Package, PackageStatus, PriceChannel, Shelf, Shipment, ShipmentStatus,
    };
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{KvStore, MemoryStore};
    pub use crate::state::{AppState, TrackingOptions};
}
