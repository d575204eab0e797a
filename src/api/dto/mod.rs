//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Bodies use camelCase field names like the stored
//! documents.

pub mod backup;
pub mod health;
pub mod package;
pub mod pagination;
pub mod preset;
pub mod pricing;
pub mod shelf;
pub mod shipment;
pub mod tracking;
