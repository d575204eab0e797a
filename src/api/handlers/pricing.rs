//! Handlers for the price table and rate calculator.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pricing::{FuelSurchargeRequest, QuoteListResponse, QuoteQuery};
use crate::domain::entities::{FuelSurcharge, PriceChannel};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/pricing/channels`
pub async fn list_channels_handler(State(state): State<AppState>) -> Json<Vec<PriceChannel>> {
    Json(state.pricing_service.list_channels().await)
}

/// Adds a price channel.
///
/// # Endpoint
///
/// `POST /api/pricing/channels`
///
/// A blank `id` is generated.
///
/// # Errors
///
/// - 400 if the channel definition is inconsistent
/// - 409 if the id is taken
pub async fn create_channel_handler(
    State(state): State<AppState>,
    Json(payload): Json<PriceChannel>,
) -> Result<(StatusCode, Json<PriceChannel>), AppError> {
    let channel = state.pricing_service.create_channel(payload).await?;
    Ok((StatusCode::CREATED, Json(channel)))
}

/// Replaces a price channel. The path id wins over the body.
///
/// # Endpoint
///
/// `PUT /api/pricing/channels/{id}`
pub async fn update_channel_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<PriceChannel>,
) -> Result<Json<PriceChannel>, AppError> {
    Ok(Json(state.pricing_service.update_channel(&id, payload).await?))
}

/// `DELETE /api/pricing/channels/{id}`
pub async fn delete_channel_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.pricing_service.delete_channel(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Prices a parcel.
///
/// # Endpoint
///
/// `GET /api/pricing/quote?weight=1.2[&channel=..][&country=..][&surcharge=false]`
///
/// With `channel` the response holds exactly one quote; otherwise every
/// matching channel that serves the weight, cheapest first.
///
/// # Errors
///
/// - 400 for a non-positive weight, or one the requested channel does not serve
/// - 404 for an unknown channel
pub async fn quote_handler(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteListResponse>, AppError> {
    let with_surcharge = query.surcharge.unwrap_or(true);

    let items = match query.channel.as_deref().filter(|c| !c.is_empty()) {
        Some(channel_id) => vec![
            state
                .pricing_service
                .quote(channel_id, query.weight, with_surcharge)
                .await?,
        ],
        None => {
            let country = query.country.as_deref().filter(|c| !c.trim().is_empty());
            state
                .pricing_service
                .quote_all(country, query.weight, with_surcharge)
                .await?
        }
    };

    Ok(Json(QuoteListResponse { items }))
}

/// `GET /api/pricing/fuel-surcharges`
pub async fn fuel_surcharges_handler(State(state): State<AppState>) -> Json<Vec<FuelSurcharge>> {
    Json(state.pricing_service.fuel_surcharges().await)
}

/// Sets a carrier's fuel surcharge rate, adding the carrier if new.
///
/// # Endpoint
///
/// `PUT /api/pricing/fuel-surcharges/{carrier}`
pub async fn update_fuel_surcharge_handler(
    Path(carrier): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<FuelSurchargeRequest>,
) -> Result<Json<FuelSurcharge>, AppError> {
    let updated = state
        .pricing_service
        .update_fuel_surcharge(&carrier, payload.rate)
        .await?;
    Ok(Json(updated))
}
