//! AfterShip API v4 client.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::provider::{TrackingError, TrackingProvider};
use crate::domain::entities::{
    Carrier, EventStatus, TrackingEvent, TrackingResult, TrackingStatus,
};

pub const DEFAULT_BASE_URL: &str = "https://api.aftership.com";

/// AfterShip `meta.code` for an unknown tracking.
const META_NOT_FOUND: i64 = 4004;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    meta: Option<Meta>,
    #[serde(default)]
    data: Option<Data>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    code: i64,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(default)]
    tracking: Option<Tracking>,
}

#[derive(Debug, Deserialize)]
struct Tracking {
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    origin_country_iso3: Option<String>,
    #[serde(default)]
    destination_country_iso3: Option<String>,
    #[serde(default)]
    expected_delivery: Option<String>,
    /// Oldest first.
    #[serde(default)]
    checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Deserialize)]
struct Checkpoint {
    #[serde(default)]
    checkpoint_time: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Parses RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare date.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn checkpoint_location(cp: &Checkpoint) -> String {
    if let Some(loc) = non_empty(cp.location.clone()) {
        return loc;
    }
    let parts: Vec<String> = [cp.city.clone(), cp.country_name.clone()]
        .into_iter()
        .filter_map(non_empty)
        .collect();
    if parts.is_empty() {
        "Unknown location".to_string()
    } else {
        parts.join(", ")
    }
}

/// Parses a `GET /v4/trackings/...` response body.
///
/// Returns `Ok(None)` when AfterShip does not know the number.
pub fn parse_response(
    number: &str,
    requested: Option<Carrier>,
    body: &str,
) -> Result<Option<TrackingResult>, TrackingError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| TrackingError::Parse(e.to_string()))?;

    if let Some(meta) = &envelope.meta {
        if meta.code == META_NOT_FOUND {
            return Ok(None);
        }
        if !(200..300).contains(&meta.code) {
            return Err(TrackingError::Rejected(format!(
                "AfterShip code {}: {}",
                meta.code,
                meta.message.as_deref().unwrap_or("no message")
            )));
        }
    }

    let Some(tracking) = envelope.data.and_then(|d| d.tracking) else {
        return Ok(None);
    };

    let status = tracking
        .tag
        .as_deref()
        .map(TrackingStatus::from_aftership_tag)
        .unwrap_or(TrackingStatus::Unknown);

    let last = tracking.checkpoints.len().saturating_sub(1);
    let mut timeline: Vec<TrackingEvent> = tracking
        .checkpoints
        .iter()
        .enumerate()
        .map(|(idx, cp)| TrackingEvent {
            time: cp.checkpoint_time.as_deref().and_then(parse_timestamp),
            location: checkpoint_location(cp),
            description: non_empty(cp.message.clone())
                .unwrap_or_else(|| "Status update".to_string()),
            status: if idx == last {
                EventStatus::Current
            } else {
                EventStatus::Completed
            },
        })
        .collect();

    let origin = non_empty(tracking.origin_country_iso3)
        .or_else(|| timeline.first().map(|e| e.location.clone()))
        .unwrap_or_else(|| "Unknown".to_string());
    let destination = non_empty(tracking.destination_country_iso3)
        .or_else(|| timeline.last().map(|e| e.location.clone()))
        .unwrap_or_else(|| "Unknown".to_string());

    let estimated_delivery = tracking
        .expected_delivery
        .as_deref()
        .and_then(parse_timestamp);
    if let Some(eta) = estimated_delivery
        && status != TrackingStatus::Delivered
    {
        timeline.push(TrackingEvent {
            time: Some(eta),
            location: destination.clone(),
            description: "Estimated delivery".to_string(),
            status: EventStatus::Pending,
        });
    }

    Ok(Some(TrackingResult {
        tracking_number: number.to_string(),
        carrier: tracking
            .slug
            .as_deref()
            .and_then(Carrier::from_aftership_slug)
            .or(requested),
        status,
        status_text: status.text().to_string(),
        origin,
        destination,
        estimated_delivery,
        timeline,
        source: "aftership".to_string(),
    }))
}

pub struct AfterShipProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AfterShipProvider {
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self, number: &str, carrier: Option<Carrier>) -> String {
        match carrier {
            Some(c) => format!(
                "{}/v4/trackings/{}/{}",
                self.base_url,
                c.aftership_slug(),
                number
            ),
            None => format!("{}/v4/trackings/{}", self.base_url, number),
        }
    }
}

#[async_trait]
impl TrackingProvider for AfterShipProvider {
    fn name(&self) -> &'static str {
        "aftership"
    }

    async fn track(
        &self,
        number: &str,
        carrier: Option<Carrier>,
    ) -> Result<Option<TrackingResult>, TrackingError> {
        let response = self
            .http_client
            .get(self.url(number, carrier))
            .header("aftership-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TrackingError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(number, bytes = body.len(), "AfterShip response received");
        parse_response(number, carrier, &body)
    }
}
