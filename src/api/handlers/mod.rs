//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod backup;
pub mod dashboard;
pub mod health;
pub mod packages;
pub mod presets;
pub mod pricing;
pub mod settings;
pub mod shelves;
pub mod shipments;
pub mod tracking;

pub use backup::{clear_data_handler, export_backup_handler, import_backup_handler};
pub use dashboard::dashboard_handler;
pub use health::health_handler;
pub use packages::{
    batch_delete_handler, batch_status_handler, create_package_handler, delete_package_handler,
    export_packages_handler, get_package_handler, last_entry_handler, list_packages_handler,
    update_package_handler,
};
pub use presets::{
    add_preset_handler, list_presets_handler, list_statuses_handler, remove_preset_handler,
    reset_statuses_handler, set_status_label_handler,
};
pub use pricing::{
    create_channel_handler, delete_channel_handler, fuel_surcharges_handler, list_channels_handler,
    quote_handler, update_channel_handler, update_fuel_surcharge_handler,
};
pub use settings::{get_settings_handler, update_settings_handler};
pub use shelves::{
    adjust_shelf_handler, create_shelf_handler, delete_shelf_handler, list_shelves_handler,
    recount_shelves_handler, shelf_alerts_handler, update_shelf_handler,
};
pub use shipments::{
    available_packages_handler, create_shipment_handler, get_shipment_handler,
    list_shipments_handler, update_shipment_status_handler,
};
pub use tracking::{detect_carrier_handler, track_handler};

use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Wraps `body` as a file download.
pub(crate) fn attachment(content_type: &str, filename: &str, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}
