//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Key-value storage backends (memory, file, Redis)
//! - [`persistence`] - Repository implementations over the key-value store
//! - [`tracking`] - 17track, AfterShip and demo tracking providers

pub mod persistence;
pub mod store;
pub mod tracking;
