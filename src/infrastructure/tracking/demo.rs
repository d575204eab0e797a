//! Built-in demo tracking data used when no provider answers.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use super::provider::{TrackingError, TrackingProvider};
use crate::domain::entities::{
    Carrier, EventStatus, TrackingEvent, TrackingResult, TrackingStatus,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single()
}

fn event(
    time: Option<DateTime<Utc>>,
    location: &str,
    description: &str,
    status: EventStatus,
) -> TrackingEvent {
    TrackingEvent {
        time,
        location: location.to_string(),
        description: description.to_string(),
        status,
    }
}

fn dhl_in_transit(number: &str) -> TrackingResult {
    let eta = at(2024, 1, 25, 0, 0);
    TrackingResult {
        tracking_number: number.to_string(),
        carrier: Some(Carrier::Dhl),
        status: TrackingStatus::InTransit,
        status_text: TrackingStatus::InTransit.text().to_string(),
        origin: "Shenzhen, China".to_string(),
        destination: "New York, USA".to_string(),
        estimated_delivery: eta,
        timeline: vec![
            event(at(2024, 1, 20, 14, 30), "Shenzhen", "Shipment dispatched", EventStatus::Completed),
            event(at(2024, 1, 21, 8, 15), "Hong Kong transit hub", "Arrived at transit hub", EventStatus::Completed),
            event(at(2024, 1, 22, 16, 45), "In flight", "Departed to destination", EventStatus::Current),
            event(eta, "New York", "Estimated delivery", EventStatus::Pending),
        ],
        source: "demo".to_string(),
    }
}

fn ups_delivered(number: &str) -> TrackingResult {
    TrackingResult {
        tracking_number: number.to_string(),
        carrier: Some(Carrier::Ups),
        status: TrackingStatus::Delivered,
        status_text: TrackingStatus::Delivered.text().to_string(),
        origin: "Los Angeles, USA".to_string(),
        destination: "Shanghai, China".to_string(),
        estimated_delivery: at(2024, 1, 22, 0, 0),
        timeline: vec![
            event(at(2024, 1, 18, 10, 0), "Los Angeles", "Shipment dispatched", EventStatus::Completed),
            event(at(2024, 1, 20, 14, 30), "Anchorage", "Processed at transit hub", EventStatus::Completed),
            event(at(2024, 1, 21, 11, 20), "Shanghai Pudong Airport", "Arrived at destination", EventStatus::Completed),
            event(at(2024, 1, 22, 15, 45), "Shanghai", "Delivered", EventStatus::Completed),
        ],
        source: "demo".to_string(),
    }
}

/// Fixture-backed provider answering for `DHL123456789` and `UPS987654321` only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoTrackingProvider;

impl DemoTrackingProvider {
    pub fn lookup(&self, number: &str) -> Option<TrackingResult> {
        match number {
            "DHL123456789" => Some(dhl_in_transit(number)),
            "UPS987654321" => Some(ups_delivered(number)),
            _ => None,
        }
    }
}

#[async_trait]
impl TrackingProvider for DemoTrackingProvider {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn track(
        &self,
        number: &str,
        _carrier: Option<Carrier>,
    ) -> Result<Option<TrackingResult>, TrackingError> {
        Ok(self.lookup(number))
    }
}
