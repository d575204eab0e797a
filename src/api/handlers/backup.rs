//! Handlers for backup export, import and data reset.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};

use super::attachment;
use crate::api::dto::backup::{ClearQuery, ImportResponse};
use crate::domain::entities::BackupSnapshot;
use crate::error::AppError;
use crate::state::AppState;

/// Downloads a JSON snapshot of every collection.
///
/// # Endpoint
///
/// `GET /api/backup`
pub async fn export_backup_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let export = state.backup_service.export().await?;
    Ok(attachment(
        "application/json",
        &export.filename,
        Json(export.snapshot),
    ))
}

/// Restores a snapshot. Only the sections present in the body are overwritten.
///
/// # Endpoint
///
/// `POST /api/backup`
///
/// # Errors
///
/// Returns 400 if the body contains no known section or invalid settings.
pub async fn import_backup_handler(
    State(state): State<AppState>,
    Json(payload): Json<BackupSnapshot>,
) -> Result<Json<ImportResponse>, AppError> {
    let restored = state.backup_service.import(payload).await?;
    Ok(Json(ImportResponse { restored }))
}

/// Deletes all warehouse data. API tokens are kept.
///
/// # Endpoint
///
/// `DELETE /api/backup?confirm=true`
pub async fn clear_data_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Result<StatusCode, AppError> {
    state.backup_service.clear(query.confirm).await?;
    Ok(StatusCode::NO_CONTENT)
}
