//! DTOs for the rate calculator and price table.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::pricing::Quote;

/// Query parameters for `GET /api/pricing/quote`.
///
/// With `channel` a single channel is priced; otherwise every channel
/// (optionally restricted to `country`) that serves the weight.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    #[serde_as(as = "DisplayFromStr")]
    pub weight: f64,

    pub channel: Option<String>,

    pub country: Option<String>,

    /// Include the carrier fuel surcharge (default: true).
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub surcharge: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    pub items: Vec<Quote>,
}

/// Request body for `PUT /api/pricing/fuel-surcharges/{carrier}`.
#[derive(Debug, Deserialize)]
pub struct FuelSurchargeRequest {
    /// Percent, e.g. `24.5`.
    pub rate: f64,
}
