//! Handlers for owner/tag presets and status labels.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::preset::{AddPresetRequest, PresetListResponse, StatusLabelRequest};
use crate::domain::entities::{PackageStatus, PresetList, StatusLabel};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/presets/{owners|tags}`
pub async fn list_presets_handler(
    Path(list): Path<PresetList>,
    State(state): State<AppState>,
) -> Json<PresetListResponse> {
    Json(PresetListResponse {
        items: state.preset_service.list(list).await,
    })
}

/// Adds a value to a preset list.
///
/// # Endpoint
///
/// `POST /api/presets/{owners|tags}`
///
/// # Errors
///
/// Returns 409 if the value already exists.
pub async fn add_preset_handler(
    Path(list): Path<PresetList>,
    State(state): State<AppState>,
    Json(payload): Json<AddPresetRequest>,
) -> Result<(StatusCode, Json<PresetListResponse>), AppError> {
    payload.validate()?;
    let items = state.preset_service.add(list, &payload.value).await?;
    Ok((StatusCode::CREATED, Json(PresetListResponse { items })))
}

/// `DELETE /api/presets/{owners|tags}/{name}`
pub async fn remove_preset_handler(
    Path((list, name)): Path<(PresetList, String)>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.preset_service.remove(list, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/presets/statuses`
pub async fn list_statuses_handler(State(state): State<AppState>) -> Json<Vec<StatusLabel>> {
    Json(state.preset_service.statuses().await)
}

/// Renames the display label of one status.
///
/// # Endpoint
///
/// `PUT /api/presets/statuses/{status}`
pub async fn set_status_label_handler(
    Path(status): Path<PackageStatus>,
    State(state): State<AppState>,
    Json(payload): Json<StatusLabelRequest>,
) -> Result<Json<Vec<StatusLabel>>, AppError> {
    payload.validate()?;
    let labels = state
        .preset_service
        .set_status_label(status, &payload.label)
        .await?;
    Ok(Json(labels))
}

/// Restores the default status labels.
///
/// # Endpoint
///
/// `DELETE /api/presets/statuses`
pub async fn reset_statuses_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusLabel>>, AppError> {
    Ok(Json(state.preset_service.reset_statuses().await?))
}
