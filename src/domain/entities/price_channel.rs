//! Price channel entity: a named carrier/country rate rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a channel turns a weight into a fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMethod {
    /// First unit at `first_weight`, every further unit at `additional_weight`.
    FirstPlusAdditional,
    /// `first_weight` per kg plus a flat `handling_fee`.
    PerKg,
}

/// Inclusive weight bounds in kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

/// Per-kg price for heavy parcels beyond the channel's base range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTier {
    pub min_kg: f64,
    pub max_kg: f64,
    pub price_per_kg: f64,
}

/// A rate rule for one carrier service into one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChannel {
    /// Generated on creation when left blank.
    #[serde(default)]
    pub id: String,
    pub channel: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    pub weight_range: WeightRange,
    pub billing_method: BillingMethod,
    pub first_weight: f64,
    #[serde(default)]
    pub additional_weight: f64,
    pub unit_kg: f64,
    #[serde(default)]
    pub handling_fee: f64,
    #[serde(default)]
    pub tiers: Vec<WeightTier>,
    #[serde(default)]
    pub time_frame: String,
    #[serde(default)]
    pub notes: String,
}

/// Carrier-wide fuel surcharge in percent of the base fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelSurcharge {
    pub carrier: String,
    pub rate: f64,
    pub last_updated: NaiveDate,
}

/// Channels available before the operator edits the price table.
pub fn default_price_channels() -> Vec<PriceChannel> {
    vec![
        PriceChannel {
            id: "us-dhl-air".to_string(),
            channel: "US DHL Air".to_string(),
            country: "United States".to_string(),
            carrier: Some("DHL".to_string()),
            weight_range: WeightRange {
                min_kg: 0.5,
                max_kg: 20.0,
            },
            billing_method: BillingMethod::FirstPlusAdditional,
            first_weight: 165.0,
            additional_weight: 35.0,
            unit_kg: 0.5,
            handling_fee: 0.0,
            tiers: vec![
                WeightTier {
                    min_kg: 21.0,
                    max_kg: 51.0,
                    price_per_kg: 65.0,
                },
                WeightTier {
                    min_kg: 52.0,
                    max_kg: 101.0,
                    price_per_kg: 60.0,
                },
            ],
            time_frame: "3-5 business days".to_string(),
            notes: "21-51kg at 65/kg, 52-101kg at 60/kg".to_string(),
        },
        PriceChannel {
            id: "us-usps-small".to_string(),
            channel: "US USPS Small Parcel".to_string(),
            country: "United States".to_string(),
            carrier: Some("USPS".to_string()),
            weight_range: WeightRange {
                min_kg: 0.1,
                max_kg: 0.5,
            },
            billing_method: BillingMethod::PerKg,
            first_weight: 100.0,
            additional_weight: 0.0,
            unit_kg: 0.1,
            handling_fee: 30.0,
            tiers: vec![],
            time_frame: "7-15 business days".to_string(),
            notes: "100/kg plus 30 handling fee".to_string(),
        },
    ]
}

/// Fuel surcharges before the operator updates them.
pub fn default_fuel_surcharges() -> Vec<FuelSurcharge> {
    let updated = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
    [("DHL", 24.5), ("UPS", 18.25), ("FedEx", 19.75)]
        .into_iter()
        .map(|(carrier, rate)| FuelSurcharge {
            carrier: carrier.to_string(),
            rate,
            last_updated: updated,
        })
        .collect()
}
