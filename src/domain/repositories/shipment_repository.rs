//! Repository trait for shipments.

use crate::domain::entities::{Shipment, ShipmentStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the shipment collection, kept newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn list(&self) -> Vec<Shipment>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Shipment>, AppError>;

    /// Inserts a shipment at the front of the collection.
    async fn insert(&self, shipment: Shipment) -> Result<Shipment, AppError>;

    /// Moves a shipment to `status`, checking the transition against the
    /// stored status under the document lock.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the shipment does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the transition does not move forward.
    async fn transition(
        &self,
        id: &str,
        status: ShipmentStatus,
    ) -> Result<Option<Shipment>, AppError>;
}
