//! DTOs for shipment endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Package, Recipient, Shipment, ShipmentStatus};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 40))]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub zip_code: String,
}

impl From<RecipientRequest> for Recipient {
    fn from(r: RecipientRequest) -> Self {
        Recipient {
            name: r.name,
            phone: r.phone,
            email: r.email,
            address: r.address,
            country: r.country,
            zip_code: r.zip_code,
        }
    }
}

/// Request body for `POST /api/shipments`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub package_ids: Vec<String>,
    #[validate(nested)]
    pub recipient: RecipientRequest,
}

/// Request body for `PATCH /api/shipments/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateShipmentStatusRequest {
    pub status: ShipmentStatus,
}

#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    pub owner: Option<String>,
}

/// Shipment with its derived total weight.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentItem {
    #[serde(flatten)]
    pub shipment: Shipment,
    pub total_weight: f64,
    pub package_count: usize,
}

impl From<Shipment> for ShipmentItem {
    fn from(shipment: Shipment) -> Self {
        ShipmentItem {
            total_weight: shipment.total_weight(),
            package_count: shipment.packages.len(),
            shipment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShipmentListResponse {
    pub items: Vec<ShipmentItem>,
}

#[derive(Debug, Serialize)]
pub struct AvailablePackagesResponse {
    pub owners: Vec<String>,
    pub items: Vec<Package>,
}
