//! Third-party logistics tracking clients.
//!
//! - [`SeventeenTrackProvider`] - 17track (`17token` header)
//! - [`AfterShipProvider`] - AfterShip (`aftership-api-key` header)
//! - [`DemoTrackingProvider`] - fixtures for demos and offline use
//!
//! All providers map their answers onto [`crate::domain::entities::TrackingResult`].

pub mod aftership;
mod demo;
mod provider;
pub mod seventeen_track;

pub use aftership::AfterShipProvider;
pub use demo::DemoTrackingProvider;
pub use provider::{TrackingError, TrackingProvider};
pub use seventeen_track::SeventeenTrackProvider;

#[cfg(test)]
pub use provider::MockTrackingProvider;
