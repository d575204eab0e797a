//! Handlers for tracking lookups.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::tracking::TrackingQuery;
use crate::application::services::{CarrierGuess, TrackingLookup};
use crate::error::AppError;
use crate::state::AppState;

/// Looks up a tracking number with the configured providers.
///
/// # Endpoint
///
/// `GET /api/tracking/{number}?carrier=`
///
/// Spaces and dashes in the number are ignored. Warehouse packages carrying
/// the same number are returned in `localPackages`.
///
/// # Errors
///
/// - 400 for a malformed number
/// - 404 when no provider knows the number
pub async fn track_handler(
    Path(number): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<TrackingLookup>, AppError> {
    let lookup = state
        .tracking_service
        .lookup(&number, query.carrier)
        .await?;
    Ok(Json(lookup))
}

/// Normalizes a number and guesses its carrier without any network call.
///
/// # Endpoint
///
/// `GET /api/tracking/{number}/carrier`
pub async fn detect_carrier_handler(
    Path(number): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CarrierGuess>, AppError> {
    Ok(Json(state.tracking_service.detect(&number)?))
}
