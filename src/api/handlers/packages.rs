//! Handlers for package endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde_json::json;
use validator::Validate;

use super::attachment;
use crate::api::dto::package::{
    BatchDeleteRequest, BatchStatusRequest, CreatePackageRequest, ExportRequest,
    PackageListResponse, PackageQueryParams, UpdatePackageRequest,
};
use crate::api::dto::pagination::PaginationMeta;
use crate::application::services::package_service::BatchOutcome;
use crate::domain::entities::{LastEntry, Package};
use crate::error::AppError;
use crate::state::AppState;

/// Lists packages, newest first.
///
/// # Endpoint
///
/// `GET /api/packages`
///
/// # Query Parameters
///
/// - `page`, `page_size` (optional): default 1 and 50, page size at most 500
/// - `search` (optional): substring of tracking number, owner, shelf or tag
/// - `status`, `owner`, `shelf` (optional): exact filters
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_packages_handler(
    State(state): State<AppState>,
    Query(params): Query<PackageQueryParams>,
) -> Result<Json<PackageListResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (items, total) = state
        .package_service
        .list(&params.filter(), offset, limit)
        .await;

    Ok(Json(PackageListResponse {
        pagination: PaginationMeta::new(&params.pagination, total),
        items,
    }))
}

/// Registers an arriving package.
///
/// # Endpoint
///
/// `POST /api/packages`
///
/// Owner, shelf, tags and status are remembered as defaults for the next intake
/// (see `GET /api/packages/last-entry`).
pub async fn create_package_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<Package>), AppError> {
    payload.validate()?;
    let package = state.package_service.intake(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

/// `GET /api/packages/{id}`
pub async fn get_package_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Package>, AppError> {
    Ok(Json(state.package_service.get(&id).await?))
}

/// Partially updates a package.
///
/// # Endpoint
///
/// `PATCH /api/packages/{id}`
///
/// # Errors
///
/// Returns 404 if the package does not exist.
pub async fn update_package_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePackageRequest>,
) -> Result<Json<Package>, AppError> {
    payload.validate()?;
    let package = state.package_service.update(&id, payload.into()).await?;
    Ok(Json(package))
}

/// `DELETE /api/packages/{id}`
pub async fn delete_package_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.package_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Sets one status on many packages.
///
/// # Endpoint
///
/// `POST /api/packages/batch/status`
///
/// Unknown ids are reported in `not_found` rather than failing the batch.
pub async fn batch_status_handler(
    State(state): State<AppState>,
    Json(payload): Json<BatchStatusRequest>,
) -> Result<Json<BatchOutcome>, AppError> {
    payload.validate()?;
    let outcome = state
        .package_service
        .batch_status(&payload.ids, payload.status)
        .await?;
    Ok(Json(outcome))
}

/// `POST /api/packages/batch/delete`
pub async fn batch_delete_handler(
    State(state): State<AppState>,
    Json(payload): Json<BatchDeleteRequest>,
) -> Result<Json<BatchOutcome>, AppError> {
    payload.validate()?;
    Ok(Json(state.package_service.batch_delete(&payload.ids).await?))
}

/// Downloads packages as CSV (UTF-8 with BOM).
///
/// # Endpoint
///
/// `POST /api/packages/export`
///
/// # Errors
///
/// Returns 400 if the selection is empty.
pub async fn export_packages_handler(
    State(state): State<AppState>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let export = state
        .package_service
        .export_csv(payload.ids.as_deref(), &payload.filter())
        .await?;

    Ok(attachment(
        "text/csv; charset=utf-8",
        &export.filename,
        export.content,
    ))
}

/// `GET /api/packages/last-entry`
pub async fn last_entry_handler(State(state): State<AppState>) -> Json<LastEntry> {
    Json(state.package_service.last_entry().await)
}
