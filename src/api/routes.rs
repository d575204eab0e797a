//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    add_preset_handler, adjust_shelf_handler, available_packages_handler,
    batch_delete_handler, batch_status_handler, clear_data_handler, create_channel_handler,
    create_package_handler, create_shelf_handler, create_shipment_handler, dashboard_handler,
    delete_channel_handler, delete_package_handler, delete_shelf_handler,
    detect_carrier_handler, export_backup_handler, export_packages_handler,
    fuel_surcharges_handler, get_package_handler, get_settings_handler, get_shipment_handler,
    import_backup_handler, last_entry_handler, list_channels_handler, list_packages_handler,
    list_presets_handler, list_shelves_handler, list_shipments_handler, list_statuses_handler,
    quote_handler, recount_shelves_handler, remove_preset_handler, reset_statuses_handler,
    set_status_label_handler, shelf_alerts_handler, track_handler, update_channel_handler,
    update_fuel_surcharge_handler, update_package_handler, update_settings_handler,
    update_shelf_handler, update_shipment_status_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
};

/// Upper bound for backup uploads; snapshots are far larger than regular bodies.
const BACKUP_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /dashboard`                          - Summary counters and shelf alerts
/// - `GET    /packages`, `POST /packages`         - Filtered list (paginated) / intake
/// - `GET|PATCH|DELETE /packages/{id}`            - Single package
/// - `POST   /packages/batch/status`              - Bulk status change
/// - `POST   /packages/batch/delete`              - Bulk delete
/// - `POST   /packages/export`                    - CSV download
/// - `GET    /packages/last-entry`                - Defaults for the next intake
/// - `GET    /shipments`, `POST /shipments`       - Outbound shipments
/// - `GET    /shipments/available`                - In-stock packages grouped by owner
/// - `GET    /shipments/{id}`                     - Single shipment
/// - `PATCH  /shipments/{id}/status`              - Advance a shipment
/// - `GET    /shelves`, `POST /shelves`           - Shelf list / creation
/// - `PATCH|DELETE /shelves/{id}`                 - Single shelf
/// - `POST   /shelves/recount`                    - Rebuild counters from packages
/// - `POST   /shelves/adjust`                     - Manual counter correction
/// - `GET    /shelves/alerts`                     - Nearly full shelves
/// - `GET|POST /pricing/channels`, `PUT|DELETE /pricing/channels/{id}`
/// - `GET    /pricing/quote`                      - Rate calculator
/// - `GET    /pricing/fuel-surcharges`, `PUT /pricing/fuel-surcharges/{carrier}`
/// - `GET    /tracking/{number}`                  - Carrier lookup
/// - `GET    /tracking/{number}/carrier`          - Carrier detection only
/// - `GET|POST /presets/{owners|tags}`, `DELETE /presets/{owners|tags}/{name}`
/// - `GET|DELETE /presets/statuses`, `PUT /presets/statuses/{status}`
/// - `GET|PUT /settings`
/// - `GET|POST|DELETE /backup`                    - Export, import, clear
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route(
            "/packages",
            get(list_packages_handler).post(create_package_handler),
        )
        .route("/packages/last-entry", get(last_entry_handler))
        .route("/packages/batch/status", post(batch_status_handler))
        .route("/packages/batch/delete", post(batch_delete_handler))
        .route("/packages/export", post(export_packages_handler))
        .route(
            "/packages/{id}",
            get(get_package_handler)
                .patch(update_package_handler)
                .delete(delete_package_handler),
        )
        .route(
            "/shipments",
            get(list_shipments_handler).post(create_shipment_handler),
        )
        .route("/shipments/available", get(available_packages_handler))
        .route("/shipments/{id}", get(get_shipment_handler))
        .route(
            "/shipments/{id}/status",
            patch(update_shipment_status_handler),
        )
        .route(
            "/shelves",
            get(list_shelves_handler).post(create_shelf_handler),
        )
        .route("/shelves/recount", post(recount_shelves_handler))
        .route("/shelves/adjust", post(adjust_shelf_handler))
        .route("/shelves/alerts", get(shelf_alerts_handler))
        .route(
            "/shelves/{id}",
            patch(update_shelf_handler).delete(delete_shelf_handler),
        )
        .route(
            "/pricing/channels",
            get(list_channels_handler).post(create_channel_handler),
        )
        .route(
            "/pricing/channels/{id}",
            put(update_channel_handler).delete(delete_channel_handler),
        )
        .route("/pricing/quote", get(quote_handler))
        .route("/pricing/fuel-surcharges", get(fuel_surcharges_handler))
        .route(
            "/pricing/fuel-surcharges/{carrier}",
            put(update_fuel_surcharge_handler),
        )
        .route("/tracking/{number}", get(track_handler))
        .route("/tracking/{number}/carrier", get(detect_carrier_handler))
        .route(
            "/presets/statuses",
            get(list_statuses_handler).delete(reset_statuses_handler),
        )
        .route(
            "/presets/statuses/{status}",
            put(set_status_label_handler),
        )
        .route(
            "/presets/{list}",
            get(list_presets_handler).post(add_preset_handler),
        )
        .route(
            "/presets/{list}/{name}",
            delete(remove_preset_handler),
        )
        .route(
            "/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route(
            "/backup",
            get(export_backup_handler)
                .post(import_backup_handler)
                .delete(clear_data_handler)
                .layer(DefaultBodyLimit::max(BACKUP_BODY_LIMIT)),
        )
}
