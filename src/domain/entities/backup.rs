//! Backup snapshot of every warehouse collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    FuelSurcharge, LastEntry, Package, PriceChannel, Shelf, Shipment, StatusLabel, SystemSettings,
};

/// Full or partial copy of the warehouse data.
///
/// Exports fill every section. On import only the sections present are
/// written; absent sections keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipments: Option<Vec<Shipment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelves: Option<Vec<Shelf>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<StatusLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_channels: Option<Vec<PriceChannel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_surcharges: Option<Vec<FuelSurcharge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_entry: Option<LastEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SystemSettings>,
}

impl BackupSnapshot {
    /// Names of the sections carried by this snapshot.
    pub fn sections(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        let present = [
            ("packages", self.packages.is_some()),
            ("shipments", self.shipments.is_some()),
            ("shelves", self.shelves.is_some()),
            ("owners", self.owners.is_some()),
            ("tags", self.tags.is_some()),
            ("statuses", self.statuses.is_some()),
            ("priceChannels", self.price_channels.is_some()),
            ("fuelSurcharges", self.fuel_surcharges.is_some()),
            ("lastEntry", self.last_entry.is_some()),
            ("settings", self.settings.is_some()),
        ];
        for (name, is_present) in present {
            if is_present {
                out.push(name);
            }
        }
        out
    }
}
