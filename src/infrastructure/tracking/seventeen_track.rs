//! 17track API v2.2 client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use tracing::debug;

use super::provider::{TrackingError, TrackingProvider};
use crate::domain::entities::{
    Carrier, EventStatus, TrackingEvent, TrackingResult, TrackingStatus,
};

pub const DEFAULT_BASE_URL: &str = "https://api.17track.net";
const TRACK_PATH: &str = "/track/v2.2/gettrackinfo";

#[derive(Debug, Deserialize)]
struct TrackResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    dat: Vec<TrackItem>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct TrackItem {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    carrier: Option<u32>,
    #[serde(default)]
    track: Option<TrackInfo>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct TrackInfo {
    /// Status code.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    e: Option<u32>,
    /// Estimated delivery, unix seconds; `0` when unknown.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    w1: Option<i64>,
    /// Estimated delivery place.
    #[serde(default)]
    w2: Option<String>,
    /// Events, newest first.
    #[serde(default)]
    z: Vec<TrackEvent>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct TrackEvent {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    a: Option<i64>,
    #[serde(default)]
    c: Option<String>,
    #[serde(default)]
    z: Option<String>,
}

fn from_unix(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.filter(|s| *s > 0)
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parses a `gettrackinfo` response body.
///
/// Returns `Ok(None)` when the provider has no information about the number.
pub fn parse_response(
    number: &str,
    requested: Option<Carrier>,
    body: &str,
) -> Result<Option<TrackingResult>, TrackingError> {
    let response: TrackResponse =
        serde_json::from_str(body).map_err(|e| TrackingError::Parse(e.to_string()))?;

    if let Some(code) = response.code
        && code != 0
    {
        return Err(TrackingError::Rejected(format!("17track code {}", code)));
    }

    let Some(item) = response.dat.into_iter().next() else {
        return Ok(None);
    };
    let Some(track) = item.track else {
        return Ok(None);
    };

    let status = track
        .e
        .map(TrackingStatus::from_seventeen_track)
        .unwrap_or(TrackingStatus::Unknown);

    if status == TrackingStatus::NotFound && track.z.is_empty() {
        return Ok(None);
    }

    let mut timeline: Vec<TrackingEvent> = track
        .z
        .into_iter()
        .enumerate()
        .map(|(idx, event)| TrackingEvent {
            time: from_unix(event.a),
            location: non_empty(event.c).unwrap_or_else(|| "Unknown location".to_string()),
            description: non_empty(event.z).unwrap_or_else(|| "Status update".to_string()),
            status: if idx == 0 {
                EventStatus::Current
            } else {
                EventStatus::Completed
            },
        })
        .collect();
    timeline.reverse();

    let origin = timeline
        .first()
        .map(|e| e.location.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    let mut destination = timeline
        .last()
        .map(|e| e.location.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let estimated_delivery = from_unix(track.w1);
    if let Some(eta) = estimated_delivery {
        let place = non_empty(track.w2).unwrap_or_else(|| "Destination".to_string());
        destination = place.clone();
        timeline.push(TrackingEvent {
            time: Some(eta),
            location: place,
            description: "Estimated delivery".to_string(),
            status: EventStatus::Pending,
        });
    }

    Ok(Some(TrackingResult {
        tracking_number: number.to_string(),
        carrier: item
            .carrier
            .and_then(Carrier::from_seventeen_track_code)
            .or(requested),
        status,
        status_text: status.text().to_string(),
        origin,
        destination,
        estimated_delivery,
        timeline,
        source: "17track".to_string(),
    }))
}

pub struct SeventeenTrackProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SeventeenTrackProvider {
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TrackingProvider for SeventeenTrackProvider {
    fn name(&self) -> &'static str {
        "17track"
    }

    async fn track(
        &self,
        number: &str,
        carrier: Option<Carrier>,
    ) -> Result<Option<TrackingResult>, TrackingError> {
        let mut entry = json!({ "number": number });
        if let Some(c) = carrier {
            entry["carrier"] = json!(c.seventeen_track_code());
        }

        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, TRACK_PATH))
            .header("17token", &self.api_key)
            .json(&json!([entry]))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackingError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(number, bytes = body.len(), "17track response received");
        parse_response(number, carrier, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IN_TRANSIT: &str = r#"{
        "code": 0,
        "dat": [{
            "no": "1Z999AA10123456784",
            "carrier": 1002,
            "track": {
                "e": 10,
                "w1": "1706140800",
                "w2": "New York",
                "z": [
                    { "a": "1705934700", "c": "In flight", "z": "Departed to destination" },
                    { "a": 1705824900, "c": "Hong Kong hub", "z": "Arrived at hub" },
                    { "a": 1705761000, "c": "Shenzhen", "z": "Shipment picked up" }
                ]
            }
        }]
    }"#;

    #[test]
    fn test_parse_in_transit() {
        let result = parse_response("1Z999AA10123456784", None, IN_TRANSIT)
            .unwrap()
            .unwrap();

        assert_eq!(result.carrier, Some(Carrier::Ups));
        assert_eq!(result.status, TrackingStatus::InTransit);
        assert_eq!(result.status_text, "In transit");
        assert_eq!(result.origin, "Shenzhen");
        assert_eq!(result.destination, "New York");
        assert_eq!(result.source, "17track");
        assert_eq!(
            result.estimated_delivery.map(|t| t.timestamp()),
            Some(1_706_140_800)
        );

        let statuses: Vec<_> = result.timeline.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                EventStatus::Completed,
                EventStatus::Completed,
                EventStatus::Current,
                EventStatus::Pending
            ]
        );
        assert_eq!(result.timeline[0].location, "Shenzhen");
        assert_eq!(result.timeline[2].description, "Departed to destination");
    }

    #[test]
    fn test_parse_without_estimate_uses_latest_location() {
        let body = r#"{ "dat": [{ "carrier": "1001", "track": { "e": "30", "w1": "0",
            "z": [ { "a": 1705900000, "c": "", "z": "Delivered" },
                   { "a": 1705800000, "c": "Leipzig" } ] } }] }"#;

        let result = parse_response("1234567890", None, body).unwrap().unwrap();

        assert_eq!(result.carrier, Some(Carrier::Dhl));
        assert_eq!(result.status, TrackingStatus::Delivered);
        assert!(result.estimated_delivery.is_none());
        assert_eq!(result.origin, "Leipzig");
        assert_eq!(result.destination, "Unknown location");
        assert_eq!(result.timeline[0].description, "Status update");
        assert_eq!(result.timeline.len(), 2);
    }

    #[test]
    fn test_parse_empty_is_miss() {
        assert!(parse_response("X", None, r#"{"dat": []}"#).unwrap().is_none());
        assert!(parse_response("X", None, r#"{}"#).unwrap().is_none());
        let not_found = r#"{"dat": [{"track": {"e": 0, "z": []}}]}"#;
        assert!(parse_response("X", None, not_found).unwrap().is_none());
    }

    #[test]
    fn test_parse_keeps_requested_carrier_when_absent() {
        let body = r#"{"dat": [{"track": {"e": 10, "z": [{"a": 1705800000, "c": "Memphis", "z": "Scan"}]}}]}"#;
        let result = parse_response("X", Some(Carrier::FedEx), body)
            .unwrap()
            .unwrap();
        assert_eq!(result.carrier, Some(Carrier::FedEx));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_response("X", None, "not json"),
            Err(TrackingError::Parse(_))
        ));
        assert!(matches!(
            parse_response("X", None, r#"{"code": -18019901}"#),
            Err(TrackingError::Rejected(_))
        ));
    }
}
