//! Key-value implementation of the shipment repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::WarehouseDocuments;
use crate::domain::entities::{Shipment, ShipmentStatus};
use crate::domain::repositories::ShipmentRepository;
use crate::error::AppError;

pub struct KvShipmentRepository {
    docs: Arc<WarehouseDocuments>,
}

impl KvShipmentRepository {
    pub fn new(docs: Arc<WarehouseDocuments>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl ShipmentRepository for KvShipmentRepository {
    async fn list(&self) -> Vec<Shipment> {
        self.docs.shipments.load().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Shipment>, AppError> {
        let shipments = self.docs.shipments.try_load().await?;
        Ok(shipments.into_iter().find(|s| s.id == id))
    }

    async fn insert(&self, shipment: Shipment) -> Result<Shipment, AppError> {
        self.docs
            .shipments
            .update(move |shipments| {
                shipments.insert(0, shipment.clone());
                Ok(shipment)
            })
            .await
    }

    async fn transition(
        &self,
        id: &str,
        status: ShipmentStatus,
    ) -> Result<Option<Shipment>, AppError> {
        self.docs
            .shipments
            .update(|shipments| {
                let Some(shipment) = shipments.iter_mut().find(|s| s.id == id) else {
                    return Ok(None);
                };
                if !shipment.status.can_transition_to(status) {
                    return Err(AppError::conflict(
                        "Invalid shipment status transition",
                        json!({ "from": shipment.status.as_str(), "to": status.as_str() }),
                    ));
                }
                shipment.status = status;
                Ok(Some(shipment.clone()))
            })
            .await
    }
}
