//! Handlers for system settings.

use axum::{Json, extract::State};

use crate::domain::entities::SystemSettings;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/settings`
pub async fn get_settings_handler(State(state): State<AppState>) -> Json<SystemSettings> {
    Json(state.preset_service.settings().await)
}

/// Replaces the system settings.
///
/// # Endpoint
///
/// `PUT /api/settings`
///
/// Missing fields take their default value.
///
/// # Errors
///
/// Returns 400 if a value is out of range (e.g. `lowStockThreshold` outside 1..=100)
/// or `contactEmail` is malformed.
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Json(payload): Json<SystemSettings>,
) -> Result<Json<SystemSettings>, AppError> {
    Ok(Json(state.preset_service.update_settings(payload).await?))
}
