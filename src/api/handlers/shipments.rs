//! Handlers for shipment endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shipment::{
    AvailablePackagesResponse, AvailableQuery, CreateShipmentRequest, ShipmentItem,
    ShipmentListResponse, UpdateShipmentStatusRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/shipments`
pub async fn list_shipments_handler(State(state): State<AppState>) -> Json<ShipmentListResponse> {
    let items = state
        .shipment_service
        .list()
        .await
        .into_iter()
        .map(ShipmentItem::from)
        .collect();
    Json(ShipmentListResponse { items })
}

/// Packages that can still be shipped, with the owners among them.
///
/// # Endpoint
///
/// `GET /api/shipments/available?owner=`
pub async fn available_packages_handler(
    State(state): State<AppState>,
    Query(query): Query<AvailableQuery>,
) -> Json<AvailablePackagesResponse> {
    let owner = query.owner.as_deref().filter(|o| !o.is_empty());
    let available = state.shipment_service.available(owner).await;
    Json(AvailablePackagesResponse {
        owners: available.owners,
        items: available.packages,
    })
}

/// Creates a shipment and moves its packages out for delivery.
///
/// # Endpoint
///
/// `POST /api/shipments`
///
/// # Errors
///
/// - 400 for an empty selection or incomplete recipient
/// - 404 if a package does not exist
/// - 409 if a package is no longer in stock
pub async fn create_shipment_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<ShipmentItem>), AppError> {
    payload.validate()?;
    let shipment = state
        .shipment_service
        .create(payload.package_ids, payload.recipient.into())
        .await?;
    Ok((StatusCode::CREATED, Json(shipment.into())))
}

/// `GET /api/shipments/{id}`
pub async fn get_shipment_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShipmentItem>, AppError> {
    Ok(Json(state.shipment_service.get(&id).await?.into()))
}

/// Advances a shipment's status.
///
/// # Endpoint
///
/// `PATCH /api/shipments/{id}/status`
///
/// Status only moves forward (`pending` → `shipped` → `delivered`); delivering
/// a shipment marks its packages delivered.
///
/// # Errors
///
/// Returns 409 for a backwards or repeated transition.
pub async fn update_shipment_status_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateShipmentStatusRequest>,
) -> Result<Json<ShipmentItem>, AppError> {
    let shipment = state
        .shipment_service
        .update_status(&id, payload.status)
        .await?;
    Ok(Json(shipment.into()))
}
