//! Tracking lookups across configured providers.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::entities::{Carrier, Package, TrackingResult};
use crate::domain::repositories::PackageRepository;
use crate::error::AppError;
use crate::infrastructure::tracking::{DemoTrackingProvider, TrackingError, TrackingProvider};
use crate::utils::tracking_number::{canonical, detect_carrier, normalize};

const RETRY_BASE_MILLIS: u64 = 100;
const RETRY_MAX_DELAY: Duration = Duration::from_secs(2);

/// Outcome of a carrier guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierGuess {
    pub tracking_number: String,
    pub carrier: Option<Carrier>,
}

/// A tracking answer together with warehouse packages carrying the same number.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingLookup {
    pub result: TrackingResult,
    pub local_packages: Vec<Package>,
}

/// Service querying tracking providers in order.
///
/// Each provider is retried on transient failures. The first provider with an
/// answer wins; when none answers, the demo fixtures are consulted if enabled.
pub struct TrackingService<P: PackageRepository> {
    providers: Vec<Arc<dyn TrackingProvider>>,
    demo: Option<DemoTrackingProvider>,
    max_retries: usize,
    packages: Arc<P>,
}

impl<P: PackageRepository> TrackingService<P> {
    pub fn new(
        providers: Vec<Arc<dyn TrackingProvider>>,
        demo_fallback: bool,
        max_retries: usize,
        packages: Arc<P>,
    ) -> Self {
        Self {
            providers,
            demo: demo_fallback.then_some(DemoTrackingProvider),
            max_retries,
            packages,
        }
    }

    /// Normalizes a number and guesses its carrier.
    pub fn detect(&self, raw: &str) -> Result<CarrierGuess, AppError> {
        let tracking_number = normalize(raw)?;
        let carrier = detect_carrier(&tracking_number);
        Ok(CarrierGuess {
            tracking_number,
            carrier,
        })
    }

    /// Looks a tracking number up.
    ///
    /// An explicit `carrier` overrides detection.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed number
    /// - [`AppError::NotFound`] when no provider (and no fixture) knows the number
    pub async fn lookup(
        &self,
        raw: &str,
        carrier: Option<Carrier>,
    ) -> Result<TrackingLookup, AppError> {
        let guess = self.detect(raw)?;
        let number = guess.tracking_number;
        let carrier = carrier.or(guess.carrier);

        let result = match self.query_providers(&number, carrier).await {
            Some(result) => result,
            None => self.fallback(&number)?,
        };

        let local_packages = self
            .packages
            .list()
            .await
            .into_iter()
            .filter(|p| canonical(&p.tracking_number) == number)
            .collect();

        Ok(TrackingLookup {
            result,
            local_packages,
        })
    }

    async fn query_providers(
        &self,
        number: &str,
        carrier: Option<Carrier>,
    ) -> Option<TrackingResult> {
        for provider in &self.providers {
            let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MILLIS)
                .max_delay(RETRY_MAX_DELAY)
                .map(jitter)
                .take(self.max_retries);

            let outcome = RetryIf::spawn(
                strategy,
                || provider.track(number, carrier),
                |e: &TrackingError| {
                    debug!(provider = provider.name(), error = %e, "Tracking request failed");
                    e.is_retryable()
                },
            )
            .await;

            metrics::counter!("tracking_lookups_total", "provider" => provider.name())
                .increment(1);

            match outcome {
                Ok(Some(result)) => {
                    info!(number, provider = provider.name(), "Tracking answered");
                    return Some(result);
                }
                Ok(None) => {
                    debug!(number, provider = provider.name(), "Provider has no data");
                }
                Err(e) => {
                    warn!(number, provider = provider.name(), error = %e, "Tracking provider failed");
                    metrics::counter!("tracking_failures_total", "provider" => provider.name())
                        .increment(1);
                }
            }
        }
        None
    }

    fn fallback(&self, number: &str) -> Result<TrackingResult, AppError> {
        if let Some(result) = self.demo.as_ref().and_then(|d| d.lookup(number)) {
            metrics::counter!("tracking_demo_fallbacks_total").increment(1);
            info!(number, "Serving demo tracking data");
            return Ok(result);
        }
        Err(AppError::not_found(
            "No tracking information found",
            json!({ "tracking_number": number }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PackageStatus, TrackingStatus};
    use crate::domain::repositories::MockPackageRepository;
    use crate::infrastructure::tracking::MockTrackingProvider;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn answer(number: &str, source: &str) -> TrackingResult {
        TrackingResult {
            tracking_number: number.to_string(),
            carrier: Some(Carrier::Ups),
            status: TrackingStatus::InTransit,
            status_text: "In transit".to_string(),
            origin: "A".to_string(),
            destination: "B".to_string(),
            estimated_delivery: None,
            timeline: vec![],
            source: source.to_string(),
        }
    }

    fn no_packages() -> MockPackageRepository {
        let mut repo = MockPackageRepository::new();
        repo.expect_list().returning(Vec::new);
        repo
    }

    fn provider(name: &'static str) -> MockTrackingProvider {
        let mut p = MockTrackingProvider::new();
        p.expect_name().return_const(name);
        p
    }

    #[test]
    fn test_detect() {
        let svc = TrackingService::new(vec![], false, 0, Arc::new(MockPackageRepository::new()));
        let guess = svc.detect(" 1z999aa1-0123456784 ").unwrap();
        assert_eq!(guess.tracking_number, "1Z999AA10123456784");
        assert_eq!(guess.carrier, Some(Carrier::Ups));
        assert!(svc.detect("ab").is_err());
    }

    #[tokio::test]
    async fn test_first_provider_answer_wins() {
        let mut first = provider("17track");
        first
            .expect_track()
            .withf(|n, c| n == "1Z999AA10123456784" && *c == Some(Carrier::Ups))
            .times(1)
            .returning(|n, _| Ok(Some(answer(n, "17track"))));
        let mut second = provider("aftership");
        second.expect_track().never();

        let svc = TrackingService::new(
            vec![Arc::new(first), Arc::new(second)],
            true,
            2,
            Arc::new(no_packages()),
        );
        let lookup = svc.lookup("1z999aa10123456784", None).await.unwrap();
        assert_eq!(lookup.result.source, "17track");
    }

    #[tokio::test]
    async fn test_explicit_carrier_overrides_detection() {
        let mut p = provider("17track");
        p.expect_track()
            .withf(|_, c| *c == Some(Carrier::Dhl))
            .returning(|n, _| Ok(Some(answer(n, "17track"))));

        let svc = TrackingService::new(vec![Arc::new(p)], false, 0, Arc::new(no_packages()));
        assert!(svc.lookup("1Z999AA10123456784", Some(Carrier::Dhl)).await.is_ok());
    }

    #[tokio::test]
    async fn test_retries_transient_errors_then_moves_on() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut flaky = provider("17track");
        flaky.expect_track().returning(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(TrackingError::Status(503))
        });
        let mut backup = provider("aftership");
        backup
            .expect_track()
            .times(1)
            .returning(|n, _| Ok(Some(answer(n, "aftership"))));

        let svc = TrackingService::new(
            vec![Arc::new(flaky), Arc::new(backup)],
            false,
            2,
            Arc::new(no_packages()),
        );
        let lookup = svc.lookup("UPS987654321", None).await.unwrap();

        assert_eq!(lookup.result.source, "aftership");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let mut p = provider("17track");
        p.expect_track()
            .times(1)
            .returning(|_, _| Err(TrackingError::Status(401)));

        let svc = TrackingService::new(vec![Arc::new(p)], false, 3, Arc::new(no_packages()));
        let err = svc.lookup("SF1234567890", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_demo_fallback() {
        let mut p = provider("17track");
        p.expect_track().returning(|_, _| Ok(None));

        let svc = TrackingService::new(vec![Arc::new(p)], true, 0, Arc::new(no_packages()));
        let lookup = svc.lookup("dhl-123456789", None).await.unwrap();
        assert_eq!(lookup.result.source, "demo");

        let err = svc.lookup("SF1234567890", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_no_fallback_when_disabled() {
        let svc = TrackingService::new(vec![], false, 0, Arc::new(no_packages()));
        assert!(svc.lookup("DHL123456789", None).await.is_err());
    }

    #[tokio::test]
    async fn test_attaches_matching_local_packages() {
        let mut packages = MockPackageRepository::new();
        packages.expect_list().returning(|| {
            let make = |id: &str, tn: &str| Package {
                id: id.to_string(),
                tracking_number: tn.to_string(),
                owner: String::new(),
                shelf: String::new(),
                tags: vec![],
                status: PackageStatus::InStock,
                entry_time: Utc::now(),
                weight: None,
                notes: None,
            };
            vec![make("a", "ups 987654321"), make("b", "DHL123456789")]
        });

        let svc = TrackingService::new(vec![], true, 0, Arc::new(packages));
        let lookup = svc.lookup("UPS987654321", None).await.unwrap();

        assert_eq!(lookup.local_packages.len(), 1);
        assert_eq!(lookup.local_packages[0].id, "a");
    }
}
