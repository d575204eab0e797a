//! Normalized logistics tracking data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Carriers the tracking lookup knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    #[serde(rename = "DHL")]
    Dhl,
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "FedEx")]
    FedEx,
    #[serde(rename = "USPS")]
    Usps,
    #[serde(rename = "EMS")]
    Ems,
}

impl Carrier {
    pub const ALL: [Carrier; 5] = [
        Carrier::Dhl,
        Carrier::Ups,
        Carrier::FedEx,
        Carrier::Usps,
        Carrier::Ems,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Carrier::Dhl => "DHL",
            Carrier::Ups => "UPS",
            Carrier::FedEx => "FedEx",
            Carrier::Usps => "USPS",
            Carrier::Ems => "EMS",
        }
    }

    /// Numeric carrier code used by 17track.
    pub fn seventeen_track_code(&self) -> u32 {
        match self {
            Carrier::Dhl => 1001,
            Carrier::Ups => 1002,
            Carrier::FedEx => 1003,
            Carrier::Usps => 1004,
            Carrier::Ems => 1005,
        }
    }

    pub fn from_seventeen_track_code(code: u32) -> Option<Self> {
        Carrier::ALL
            .into_iter()
            .find(|c| c.seventeen_track_code() == code)
    }

    /// Courier slug used by AfterShip.
    pub fn aftership_slug(&self) -> &'static str {
        match self {
            Carrier::Dhl => "dhl",
            Carrier::Ups => "ups",
            Carrier::FedEx => "fedex",
            Carrier::Usps => "usps",
            Carrier::Ems => "china-ems",
        }
    }

    pub fn from_aftership_slug(slug: &str) -> Option<Self> {
        Carrier::ALL
            .into_iter()
            .find(|c| c.aftership_slug().eq_ignore_ascii_case(slug))
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Carrier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Carrier::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown carrier '{}'", s))
    }
}

/// Overall state of a tracked parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    NotFound,
    InfoReceived,
    Pending,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
    Unknown,
}

impl TrackingStatus {
    pub fn text(&self) -> &'static str {
        match self {
            TrackingStatus::NotFound => "No information yet",
            TrackingStatus::InfoReceived => "Information received",
            TrackingStatus::Pending => "Pending",
            TrackingStatus::InTransit => "In transit",
            TrackingStatus::OutForDelivery => "Out for delivery",
            TrackingStatus::Delivered => "Delivered",
            TrackingStatus::Exception => "Exception",
            TrackingStatus::Unknown => "Unknown",
        }
    }

    /// Maps a 17track `track.e` status code.
    pub fn from_seventeen_track(code: u32) -> Self {
        match code {
            0 => TrackingStatus::NotFound,
            10 => TrackingStatus::InTransit,
            20 => TrackingStatus::OutForDelivery,
            30 => TrackingStatus::Delivered,
            40 => TrackingStatus::Exception,
            _ => TrackingStatus::Unknown,
        }
    }

    /// Maps an AfterShip tag such as `InTransit`.
    pub fn from_aftership_tag(tag: &str) -> Self {
        match tag {
            "InfoReceived" => TrackingStatus::InfoReceived,
            "InTransit" => TrackingStatus::InTransit,
            "OutForDelivery" => TrackingStatus::OutForDelivery,
            "Delivered" => TrackingStatus::Delivered,
            "Exception" | "AttemptFail" => TrackingStatus::Exception,
            "Pending" => TrackingStatus::Pending,
            _ => TrackingStatus::Unknown,
        }
    }
}

/// Position of a timeline event relative to the parcel's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    pub time: Option<DateTime<Utc>>,
    pub location: String,
    pub description: String,
    pub status: EventStatus,
}

/// Carrier-independent tracking answer.
///
/// `timeline` is ordered oldest first; an estimated delivery, when known, is the
/// last entry with [`EventStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResult {
    pub tracking_number: String,
    pub carrier: Option<Carrier>,
    pub status: TrackingStatus,
    pub status_text: String,
    pub origin: String,
    pub destination: String,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub timeline: Vec<TrackingEvent>,
    /// Which provider answered (`17track`, `aftership` or `demo`).
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_codes_roundtrip() {
        for carrier in Carrier::ALL {
            assert_eq!(
                Carrier::from_seventeen_track_code(carrier.seventeen_track_code()),
                Some(carrier)
            );
            assert_eq!(
                Carrier::from_aftership_slug(carrier.aftership_slug()),
                Some(carrier)
            );
        }
        assert_eq!(Carrier::from_seventeen_track_code(9999), None);
    }

    #[test]
    fn test_carrier_from_str_is_case_insensitive() {
        assert_eq!("fedex".parse::<Carrier>().unwrap(), Carrier::FedEx);
        assert_eq!(" DHL ".parse::<Carrier>().unwrap(), Carrier::Dhl);
        assert!("SF".parse::<Carrier>().is_err());
    }

    #[test]
    fn test_carrier_serializes_as_display_name() {
        assert_eq!(serde_json::to_value(Carrier::FedEx).unwrap(), "FedEx");
    }

    #[test]
    fn test_status_mappings() {
        assert_eq!(TrackingStatus::from_seventeen_track(30), TrackingStatus::Delivered);
        assert_eq!(TrackingStatus::from_seventeen_track(99), TrackingStatus::Unknown);
        assert_eq!(
            TrackingStatus::from_aftership_tag("OutForDelivery"),
            TrackingStatus::OutForDelivery
        );
        assert_eq!(TrackingStatus::from_aftership_tag("Weird"), TrackingStatus::Unknown);
    }
}
