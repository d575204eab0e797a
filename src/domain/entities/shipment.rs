//! Shipment entity: a batch of packages bound to one recipient.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::package::Package;

/// Shipment lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Shipped,
    Delivered,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::Shipped => "shipped",
            ShipmentStatus::Delivered => "delivered",
        }
    }

    /// Returns true if a shipment may move from `self` to `next`.
    pub fn can_transition_to(&self, next: ShipmentStatus) -> bool {
        next > *self
    }
}

/// Recipient contact and address details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub address: String,
    pub country: String,
    #[serde(default)]
    pub zip_code: String,
}

/// A shipment with a snapshot of the packages it contained when created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: String,
    pub packages: Vec<Package>,
    pub recipient: Recipient,
    pub shipment_date: DateTime<Utc>,
    pub status: ShipmentStatus,
    pub tracking_number: String,
}

impl Shipment {
    /// Sum of package weights in kg; packages without a weight count as zero.
    pub fn total_weight(&self) -> f64 {
        self.packages.iter().filter_map(|p| p.weight).sum()
    }

    pub fn package_ids(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.id.clone()).collect()
    }
}

/// Builds the shipment tracking number: `SH` followed by the last 8 digits of the
/// creation time in milliseconds.
pub fn shipment_tracking_number(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("SH{}", tail)
}
