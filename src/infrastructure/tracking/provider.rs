//! Tracking provider abstraction.

use async_trait::async_trait;

use crate::domain::entities::{Carrier, TrackingResult};

/// Failure talking to a tracking provider.
///
/// Never shown to API clients: the lookup service logs it and moves on to the
/// next provider or the demo fallback.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned HTTP {0}")]
    Status(u16),

    #[error("Provider rejected the request: {0}")]
    Rejected(String),

    #[error("Invalid provider response: {0}")]
    Parse(String),
}

impl TrackingError {
    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TrackingError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            TrackingError::Status(code) => *code == 429 || *code >= 500,
            TrackingError::Rejected(_) | TrackingError::Parse(_) => false,
        }
    }
}

/// A source of tracking information.
///
/// `Ok(None)` means the provider answered but knows nothing about the number.
///
/// # Implementations
///
/// - [`super::SeventeenTrackProvider`] - 17track API v2.2
/// - [`super::AfterShipProvider`] - AfterShip API v4
/// - [`super::DemoTrackingProvider`] - built-in fixtures
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingProvider: Send + Sync {
    /// Short identifier reported as the result `source`.
    fn name(&self) -> &'static str;

    async fn track(
        &self,
        number: &str,
        carrier: Option<Carrier>,
    ) -> Result<Option<TrackingResult>, TrackingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(TrackingError::Status(503).is_retryable());
        assert!(TrackingError::Status(429).is_retryable());
        assert!(!TrackingError::Status(401).is_retryable());
        assert!(!TrackingError::Parse("bad".to_string()).is_retryable());
    }
}
