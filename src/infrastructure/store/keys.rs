//! Storage keys, one per document.

pub const PACKAGES: &str = "warehouse_packages";
pub const SHIPMENTS: &str = "warehouse_shipments";
pub const SHELVES: &str = "warehouse_shelves";
pub const OWNERS: &str = "warehouse_owners";
pub const TAGS: &str = "warehouse_tags";
pub const STATUSES: &str = "warehouse_statuses";
pub const PRICE_CHANNELS: &str = "warehouse_price_channels";
pub const LAST_ENTRY: &str = "warehouse_last_entry";
pub const SETTINGS: &str = "warehouse_settings";
pub const FUEL_SURCHARGES: &str = "warehouse_fuel_surcharges";
pub const API_TOKENS: &str = "warehouse_api_tokens";

/// Every key holding warehouse data. API tokens are not warehouse data and survive a clear.
pub const DATA_KEYS: &[&str] = &[
    PACKAGES,
    SHIPMENTS,
    SHELVES,
    OWNERS,
    TAGS,
    STATUSES,
    PRICE_CHANNELS,
    LAST_ENTRY,
    SETTINGS,
    FUEL_SURCHARGES,
];
