//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::PackageService`] - Intake, editing, batch updates and CSV export
//! - [`services::ShipmentService`] - Outbound shipments and their status flow
//! - [`services::ShelfService`] - Shelves and occupancy counters
//! - [`services::PricingService`] - Price table and rate calculator
//! - [`services::TrackingService`] - Carrier lookups with retry and demo fallback
//! - [`services::PresetService`] - Owner/tag presets, status labels and settings
//! - [`services::BackupService`] - Export, import, clear and auto-backup
//! - [`services::DashboardService`] - Aggregated overview
//! - [`services::AuthService`] - API token authentication

pub mod services;
