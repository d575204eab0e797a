//! Helpers shared across layers.
//!
//! - [`id`] - Record id generation
//! - [`tracking_number`] - Tracking number normalization and carrier detection

pub mod id;
pub mod tracking_number;
