//! Tracking number normalization and carrier detection.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use crate::domain::entities::Carrier;
use crate::error::AppError;

const MIN_LEN: usize = 6;
const MAX_LEN: usize = 40;

static UPS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^1Z[0-9A-Z]{16}$").unwrap());
static EMS_S10: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^E[A-Z][0-9]{9}[A-Z]{2}$").unwrap());
static USPS_S10: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{9}US$").unwrap());
static USPS_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^9[0-9]{19,21}$").unwrap());
static FEDEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{12}|[0-9]{15})$").unwrap());
static DHL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{10}|JD[0-9]{18})$").unwrap());

/// Literal prefixes checked after the number formats. `USPS` precedes `UPS`.
const PREFIXES: &[(&str, Carrier)] = &[
    ("FEDEX", Carrier::FedEx),
    ("USPS", Carrier::Usps),
    ("UPS", Carrier::Ups),
    ("DHL", Carrier::Dhl),
    ("EMS", Carrier::Ems),
];

/// Drops whitespace and `-` and uppercases, without validating.
///
/// Used to compare stored numbers, which are kept as entered.
pub fn canonical(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Normalizes a user-entered tracking number.
///
/// Surrounding whitespace, inner whitespace and `-` separators are dropped and
/// letters are uppercased. The result must be 6 to 40 ASCII alphanumerics.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for empty, too short, too long, or
/// non-alphanumeric input.
pub fn normalize(raw: &str) -> Result<String, AppError> {
    let normalized = canonical(raw);

    if normalized.is_empty() {
        return Err(AppError::bad_request(
            "Tracking number is required",
            json!({ "field": "tracking_number" }),
        ));
    }

    if !(MIN_LEN..=MAX_LEN).contains(&normalized.len()) {
        return Err(AppError::bad_request(
            format!("Tracking number must be {}-{} characters", MIN_LEN, MAX_LEN),
            json!({ "provided_length": normalized.len() }),
        ));
    }

    if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Tracking number may only contain letters and digits",
            json!({ "tracking_number": normalized }),
        ));
    }

    Ok(normalized)
}

/// Guesses the carrier of a normalized tracking number.
///
/// Known number formats are checked first, then literal carrier prefixes.
pub fn detect_carrier(number: &str) -> Option<Carrier> {
    if UPS.is_match(number) {
        return Some(Carrier::Ups);
    }
    if EMS_S10.is_match(number) {
        return Some(Carrier::Ems);
    }
    if USPS_S10.is_match(number) || USPS_DIGITS.is_match(number) {
        return Some(Carrier::Usps);
    }
    if FEDEX.is_match(number) {
        return Some(Carrier::FedEx);
    }
    if DHL.is_match(number) {
        return Some(Carrier::Dhl);
    }

    PREFIXES
        .iter()
        .find(|(prefix, _)| number.starts_with(prefix))
        .map(|(_, carrier)| *carrier)
}
