//! DTOs for tracking lookups.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::Carrier;

/// Query parameters for `GET /api/tracking/{number}`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TrackingQuery {
    /// Overrides carrier detection; case-insensitive (`dhl`, `UPS`, `fedex`, ...).
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub carrier: Option<Carrier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_is_case_insensitive() {
        let q: TrackingQuery = serde_json::from_str(r#"{"carrier": "fedex"}"#).unwrap();
        assert_eq!(q.carrier, Some(Carrier::FedEx));
        assert!(serde_json::from_str::<TrackingQuery>(r#"{"carrier": "acme"}"#).is_err());
    }
}
