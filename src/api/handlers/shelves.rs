//! Handlers for shelf endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shelf::{
    AdjustShelfRequest, AlertsQuery, CreateShelfRequest, ShelfItem, ShelfListResponse,
    UpdateShelfRequest,
};
use crate::domain::entities::Shelf;
use crate::error::AppError;
use crate::state::AppState;

fn to_list(shelves: Vec<Shelf>) -> ShelfListResponse {
    ShelfListResponse {
        items: shelves.into_iter().map(ShelfItem::from).collect(),
    }
}

/// `GET /api/shelves`
pub async fn list_shelves_handler(State(state): State<AppState>) -> Json<ShelfListResponse> {
    Json(to_list(state.shelf_service.list().await))
}

/// Creates a shelf.
///
/// # Endpoint
///
/// `POST /api/shelves`
///
/// # Errors
///
/// Returns 409 if a shelf with the same name exists.
pub async fn create_shelf_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateShelfRequest>,
) -> Result<(StatusCode, Json<ShelfItem>), AppError> {
    payload.validate()?;
    let shelf = state.shelf_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(shelf.into())))
}

/// `PATCH /api/shelves/{id}`
pub async fn update_shelf_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateShelfRequest>,
) -> Result<Json<ShelfItem>, AppError> {
    payload.validate()?;
    let shelf = state.shelf_service.update(&id, payload.into()).await?;
    Ok(Json(shelf.into()))
}

/// Deletes an empty shelf.
///
/// # Endpoint
///
/// `DELETE /api/shelves/{id}`
///
/// # Errors
///
/// Returns 409 while packages are counted on the shelf.
pub async fn delete_shelf_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.shelf_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Manually corrects a shelf counter by `delta`.
///
/// # Endpoint
///
/// `POST /api/shelves/adjust`
pub async fn adjust_shelf_handler(
    State(state): State<AppState>,
    Json(payload): Json<AdjustShelfRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;
    state
        .shelf_service
        .adjust(&payload.name, payload.delta)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Recomputes every shelf counter from the packages in stock.
///
/// # Endpoint
///
/// `POST /api/shelves/recount`
pub async fn recount_shelves_handler(
    State(state): State<AppState>,
) -> Result<Json<ShelfListResponse>, AppError> {
    Ok(Json(to_list(state.shelf_service.recount().await?)))
}

/// Shelves that are nearly full.
///
/// # Endpoint
///
/// `GET /api/shelves/alerts?threshold=`
///
/// Without `threshold` the configured low-stock threshold applies.
pub async fn shelf_alerts_handler(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Json<ShelfListResponse> {
    let threshold = match query.threshold {
        Some(t) => t,
        None => state.preset_service.settings().await.low_stock_threshold,
    };
    Json(to_list(state.shelf_service.alerts(threshold).await))
}
