//! The set of typed documents making up the warehouse store.

use std::sync::Arc;

use crate::domain::entities::{
    ApiToken, FuelSurcharge, LastEntry, Package, PriceChannel, Shelf, Shipment, StatusLabel,
    SystemSettings, preset, price_channel, shelf,
};
use crate::infrastructure::store::{Document, KvStore, keys};

/// One [`Document`] per storage key.
///
/// Repositories share a single instance so every key has exactly one lock
/// guarding its read-modify-write cycles.
pub struct WarehouseDocuments {
    pub packages: Document<Vec<Package>>,
    pub shipments: Document<Vec<Shipment>>,
    pub shelves: Document<Vec<Shelf>>,
    pub owners: Document<Vec<String>>,
    pub tags: Document<Vec<String>>,
    pub statuses: Document<Vec<StatusLabel>>,
    pub price_channels: Document<Vec<PriceChannel>>,
    pub last_entry: Document<LastEntry>,
    pub settings: Document<SystemSettings>,
    pub fuel_surcharges: Document<Vec<FuelSurcharge>>,
    pub api_tokens: Document<Vec<ApiToken>>,
    store: Arc<dyn KvStore>,
}

impl WarehouseDocuments {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            packages: Document::new(store.clone(), keys::PACKAGES, Vec::new),
            shipments: Document::new(store.clone(), keys::SHIPMENTS, Vec::new),
            shelves: Document::new(store.clone(), keys::SHELVES, shelf::default_shelves),
            owners: Document::new(store.clone(), keys::OWNERS, preset::default_owners),
            tags: Document::new(store.clone(), keys::TAGS, preset::default_tags),
            statuses: Document::new(store.clone(), keys::STATUSES, preset::default_statuses),
            price_channels: Document::new(
                store.clone(),
                keys::PRICE_CHANNELS,
                price_channel::default_price_channels,
            ),
            last_entry: Document::new(store.clone(), keys::LAST_ENTRY, LastEntry::default),
            settings: Document::new(store.clone(), keys::SETTINGS, SystemSettings::default),
            fuel_surcharges: Document::new(
                store.clone(),
                keys::FUEL_SURCHARGES,
                price_channel::default_fuel_surcharges,
            ),
            api_tokens: Document::new(store.clone(), keys::API_TOKENS, Vec::new),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }
}
