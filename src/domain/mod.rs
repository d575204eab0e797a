//! Domain layer containing business entities and logic.
//!
//! It defines entities, repository interfaces and pure domain rules independent of
//! storage and transport concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`pricing`] - Shipping fee calculation over price channels
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is orchestrated in services (see [`crate::application::services`])

pub mod entities;
pub mod pricing;
pub mod repositories;
