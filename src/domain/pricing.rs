//! Shipping fee calculation over price channels.
//!
//! Two billing methods exist:
//!
//! - **First + additional**: the weight is rounded up to whole `unit_kg` steps;
//!   the first step costs `first_weight`, each further step `additional_weight`.
//!   Parcels heavier than the base range are rounded up to whole kilograms and
//!   billed at the per-kg price of the matching tier.
//! - **Per kg**: the weight is rounded up to `unit_kg` and billed at
//!   `first_weight` per kg plus a flat `handling_fee`.
//!
//! Weights below the range minimum are billed as the minimum.

use serde::Serialize;

use crate::domain::entities::{BillingMethod, FuelSurcharge, PriceChannel, WeightTier};

/// Tolerance for float noise when rounding weights up to billing units.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Weight must be a positive number of kg, got {0}")]
    InvalidWeight(f64),

    #[error("Channel '{channel}' does not serve {weight} kg")]
    OutOfRange { channel: String, weight: f64 },

    #[error("Invalid price channel: {0}")]
    InvalidChannel(String),
}

/// Fee breakdown before surcharges.
#[derive(Debug, Clone, PartialEq)]
pub struct Fee {
    pub chargeable_weight_kg: f64,
    pub base_fee: f64,
    pub tier: Option<WeightTier>,
}

/// A priced offer for one channel and weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub channel_id: String,
    pub channel: String,
    pub country: String,
    pub carrier: Option<String>,
    pub billing_method: BillingMethod,
    pub weight_kg: f64,
    pub chargeable_weight_kg: f64,
    pub base_fee: f64,
    pub fuel_surcharge_rate: f64,
    pub fuel_surcharge: f64,
    pub total: f64,
    pub time_frame: String,
    pub tier: Option<WeightTier>,
}

/// Rounds a money amount to cents.
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_weight(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Number of `unit_kg` steps needed to cover `weight_kg` (at least one).
pub fn chargeable_units(weight_kg: f64, unit_kg: f64) -> u64 {
    let steps = (weight_kg / unit_kg - EPSILON).ceil();
    steps.max(1.0) as u64
}

/// Checks that a channel definition can be priced.
pub fn validate_channel(channel: &PriceChannel) -> Result<(), PricingError> {
    let invalid = |msg: &str| Err(PricingError::InvalidChannel(msg.to_string()));

    if !(channel.unit_kg > 0.0) {
        return invalid("unit must be greater than zero");
    }
    let range = channel.weight_range;
    if !(range.min_kg >= 0.0) || !(range.max_kg > 0.0) || range.min_kg > range.max_kg {
        return invalid("weight range must satisfy 0 <= min <= max and max > 0");
    }
    if channel.first_weight < 0.0 || channel.additional_weight < 0.0 || channel.handling_fee < 0.0 {
        return invalid("prices must not be negative");
    }

    let mut floor = range.max_kg;
    for tier in &channel.tiers {
        if tier.min_kg > tier.max_kg || tier.price_per_kg < 0.0 {
            return invalid("tier bounds must be ordered and prices non-negative");
        }
        if tier.min_kg <= floor {
            return invalid("tiers must be ascending and above the base weight range");
        }
        floor = tier.max_kg;
    }

    Ok(())
}

/// Computes the base fee of `channel` for a parcel of `weight_kg`.
///
/// # Errors
///
/// - [`PricingError::InvalidWeight`] for non-positive or non-finite weights
/// - [`PricingError::OutOfRange`] if neither the base range nor a tier covers the weight
pub fn calculate_fee(channel: &PriceChannel, weight_kg: f64) -> Result<Fee, PricingError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(PricingError::InvalidWeight(weight_kg));
    }

    let range = channel.weight_range;
    if weight_kg <= range.max_kg + EPSILON {
        let billable = weight_kg.max(range.min_kg);
        let units = chargeable_units(billable, channel.unit_kg);
        let chargeable = round_weight(units as f64 * channel.unit_kg);

        let base_fee = match channel.billing_method {
            BillingMethod::FirstPlusAdditional => {
                channel.first_weight + (units - 1) as f64 * channel.additional_weight
            }
            BillingMethod::PerKg => chargeable * channel.first_weight + channel.handling_fee,
        };

        return Ok(Fee {
            chargeable_weight_kg: chargeable,
            base_fee: round_money(base_fee),
            tier: None,
        });
    }

    let whole_kg = (weight_kg - EPSILON).ceil();
    let tier = channel
        .tiers
        .iter()
        .find(|t| whole_kg >= t.min_kg && whole_kg <= t.max_kg)
        .copied()
        .ok_or_else(|| PricingError::OutOfRange {
            channel: channel.channel.clone(),
            weight: weight_kg,
        })?;

    let mut base_fee = whole_kg * tier.price_per_kg;
    if channel.billing_method == BillingMethod::PerKg {
        base_fee += channel.handling_fee;
    }

    Ok(Fee {
        chargeable_weight_kg: whole_kg,
        base_fee: round_money(base_fee),
        tier: Some(tier),
    })
}

/// Finds the surcharge entry for the channel's carrier, if any.
pub fn surcharge_for<'a>(
    channel: &PriceChannel,
    surcharges: &'a [FuelSurcharge],
) -> Option<&'a FuelSurcharge> {
    let carrier = channel.carrier.as_deref()?;
    surcharges
        .iter()
        .find(|s| s.carrier.eq_ignore_ascii_case(carrier))
}

/// Prices a parcel on one channel, optionally adding the carrier fuel surcharge.
pub fn quote(
    channel: &PriceChannel,
    weight_kg: f64,
    surcharge: Option<&FuelSurcharge>,
) -> Result<Quote, PricingError> {
    let fee = calculate_fee(channel, weight_kg)?;
    let rate = surcharge.map(|s| s.rate).unwrap_or(0.0);
    let fuel_surcharge = round_money(fee.base_fee * rate / 100.0);

    Ok(Quote {
        channel_id: channel.id.clone(),
        channel: channel.channel.clone(),
        country: channel.country.clone(),
        carrier: channel.carrier.clone(),
        billing_method: channel.billing_method,
        weight_kg,
        chargeable_weight_kg: fee.chargeable_weight_kg,
        base_fee: fee.base_fee,
        fuel_surcharge_rate: rate,
        fuel_surcharge,
        total: round_money(fee.base_fee + fuel_surcharge),
        time_frame: channel.time_frame.clone(),
        tier: fee.tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::price_channel::{default_fuel_surcharges, default_price_channels};

    fn dhl() -> PriceChannel {
        default_price_channels().remove(0)
    }

    fn usps() -> PriceChannel {
        default_price_channels().remove(1)
    }

    fn fee(channel: &PriceChannel, kg: f64) -> f64 {
        calculate_fee(channel, kg).unwrap().base_fee
    }

    #[test]
    fn test_chargeable_units() {
        assert_eq!(chargeable_units(0.5, 0.5), 1);
        assert_eq!(chargeable_units(1.0, 0.5), 2);
        assert_eq!(chargeable_units(1.2, 0.5), 3);
        assert_eq!(chargeable_units(0.3, 0.1), 3);
        assert_eq!(chargeable_units(0.7, 0.1), 7);
        assert_eq!(chargeable_units(0.01, 0.5), 1);
    }

    #[test]
    fn test_first_plus_additional_within_range() {
        let ch = dhl();
        assert_eq!(fee(&ch, 0.5), 165.0);
        assert_eq!(fee(&ch, 1.0), 200.0);
        assert_eq!(fee(&ch, 1.2), 235.0);
        assert_eq!(fee(&ch, 20.0), 165.0 + 39.0 * 35.0);
    }

    #[test]
    fn test_below_minimum_is_billed_as_minimum() {
        let ch = dhl();
        let f = calculate_fee(&ch, 0.2).unwrap();
        assert_eq!(f.base_fee, 165.0);
        assert_eq!(f.chargeable_weight_kg, 0.5);
    }

    #[test]
    fn test_heavy_parcels_use_tiers() {
        let ch = dhl();

        let f = calculate_fee(&ch, 20.3).unwrap();
        assert_eq!(f.chargeable_weight_kg, 21.0);
        assert_eq!(f.base_fee, 21.0 * 65.0);
        assert_eq!(f.tier.unwrap().price_per_kg, 65.0);

        assert_eq!(fee(&ch, 51.0), 51.0 * 65.0);
        assert_eq!(fee(&ch, 51.5), 52.0 * 60.0);
        assert_eq!(fee(&ch, 101.0), 101.0 * 60.0);
    }

    #[test]
    fn test_out_of_range() {
        let err = calculate_fee(&dhl(), 101.5).unwrap_err();
        assert!(matches!(err, PricingError::OutOfRange { .. }));

        let err = calculate_fee(&usps(), 0.6).unwrap_err();
        assert!(matches!(err, PricingError::OutOfRange { .. }));
    }

    #[test]
    fn test_invalid_weight() {
        assert!(matches!(
            calculate_fee(&dhl(), 0.0),
            Err(PricingError::InvalidWeight(_))
        ));
        assert!(matches!(
            calculate_fee(&dhl(), -1.0),
            Err(PricingError::InvalidWeight(_))
        ));
        assert!(calculate_fee(&dhl(), f64::NAN).is_err());
    }

    #[test]
    fn test_per_kg_with_handling_fee() {
        let ch = usps();
        let f = calculate_fee(&ch, 0.25).unwrap();
        assert_eq!(f.chargeable_weight_kg, 0.3);
        assert_eq!(f.base_fee, 60.0);
        assert_eq!(fee(&ch, 0.5), 80.0);
        assert_eq!(fee(&ch, 0.05), 40.0);
    }

    #[test]
    fn test_quote_with_fuel_surcharge() {
        let ch = dhl();
        let surcharges = default_fuel_surcharges();
        let s = surcharge_for(&ch, &surcharges);
        assert!(s.is_some());

        let q = quote(&ch, 1.0, s).unwrap();
        assert_eq!(q.base_fee, 200.0);
        assert_eq!(q.fuel_surcharge_rate, 24.5);
        assert_eq!(q.fuel_surcharge, 49.0);
        assert_eq!(q.total, 249.0);
    }

    #[test]
    fn test_quote_without_surcharge_entry() {
        let ch = usps();
        let surcharges = default_fuel_surcharges();
        assert!(surcharge_for(&ch, &surcharges).is_none());

        let q = quote(&ch, 0.5, None).unwrap();
        assert_eq!(q.fuel_surcharge, 0.0);
        assert_eq!(q.total, 80.0);
    }

    #[test]
    fn test_validate_channel() {
        assert!(validate_channel(&dhl()).is_ok());
        assert!(validate_channel(&usps()).is_ok());

        let mut ch = dhl();
        ch.unit_kg = 0.0;
        assert!(validate_channel(&ch).is_err());

        let mut ch = dhl();
        ch.weight_range.min_kg = 30.0;
        assert!(validate_channel(&ch).is_err());

        let mut ch = dhl();
        ch.tiers[0].min_kg = 10.0;
        assert!(validate_channel(&ch).is_err());

        let mut ch = dhl();
        ch.tiers.swap(0, 1);
        assert!(validate_channel(&ch).is_err());

        let mut ch = dhl();
        ch.additional_weight = -1.0;
        assert!(validate_channel(&ch).is_err());
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(10.005_000_1), 10.01);
        assert_eq!(round_money(49.0), 49.0);
    }
}
