//! Price table management and shipping quotes.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{FuelSurcharge, PriceChannel};
use crate::domain::pricing::{self, PricingError, Quote};
use crate::domain::repositories::PriceChannelRepository;
use crate::error::AppError;
use crate::utils::id::generate_id;

fn check_channel(channel: &PriceChannel) -> Result<(), AppError> {
    if channel.channel.trim().is_empty() || channel.country.trim().is_empty() {
        return Err(AppError::bad_request(
            "Channel name and country are required",
            json!({ "fields": ["channel", "country"] }),
        ));
    }
    pricing::validate_channel(channel)?;
    Ok(())
}

pub struct PricingService<C: PriceChannelRepository> {
    channels: Arc<C>,
}

impl<C: PriceChannelRepository> PricingService<C> {
    pub fn new(channels: Arc<C>) -> Self {
        Self { channels }
    }

    pub async fn list_channels(&self) -> Vec<PriceChannel> {
        self.channels.list_channels().await
    }

    /// Adds a channel; a blank id is replaced with a generated one.
    pub async fn create_channel(&self, mut channel: PriceChannel) -> Result<PriceChannel, AppError> {
        check_channel(&channel)?;
        channel.id = match channel.id.trim() {
            "" => generate_id(),
            id => id.to_string(),
        };
        let created = self.channels.create_channel(channel).await?;
        info!(id = %created.id, channel = %created.channel, "Price channel created");
        Ok(created)
    }

    /// Replaces the channel stored under `id`.
    pub async fn update_channel(
        &self,
        id: &str,
        mut channel: PriceChannel,
    ) -> Result<PriceChannel, AppError> {
        channel.id = id.to_string();
        check_channel(&channel)?;
        self.channels
            .replace_channel(channel)
            .await?
            .ok_or_else(|| AppError::not_found("Price channel not found", json!({ "id": id })))
    }

    pub async fn delete_channel(&self, id: &str) -> Result<(), AppError> {
        if !self.channels.delete_channel(id).await? {
            return Err(AppError::not_found(
                "Price channel not found",
                json!({ "id": id }),
            ));
        }
        Ok(())
    }

    /// Prices a parcel on one channel.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown channel
    /// - [`AppError::Validation`] for a non-positive weight or one the channel does not serve
    pub async fn quote(
        &self,
        channel_id: &str,
        weight_kg: f64,
        with_surcharge: bool,
    ) -> Result<Quote, AppError> {
        let channel = self.channels.find_channel(channel_id).await?.ok_or_else(|| {
            AppError::not_found("Price channel not found", json!({ "id": channel_id }))
        })?;
        let surcharges = self.surcharges_if(with_surcharge).await;
        let surcharge = pricing::surcharge_for(&channel, &surcharges);

        Ok(pricing::quote(&channel, weight_kg, surcharge)?)
    }

    /// Prices a parcel on every channel serving it, cheapest first.
    ///
    /// `country` matches case-insensitively; channels that do not serve the
    /// weight are skipped.
    pub async fn quote_all(
        &self,
        country: Option<&str>,
        weight_kg: f64,
        with_surcharge: bool,
    ) -> Result<Vec<Quote>, AppError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(PricingError::InvalidWeight(weight_kg).into());
        }

        let surcharges = self.surcharges_if(with_surcharge).await;
        let mut quotes: Vec<Quote> = self
            .channels
            .list_channels()
            .await
            .iter()
            .filter(|c| country.is_none_or(|wanted| c.country.eq_ignore_ascii_case(wanted.trim())))
            .filter_map(|c| {
                pricing::quote(c, weight_kg, pricing::surcharge_for(c, &surcharges)).ok()
            })
            .collect();

        quotes.sort_by(|a, b| a.total.total_cmp(&b.total));
        Ok(quotes)
    }

    pub async fn fuel_surcharges(&self) -> Vec<FuelSurcharge> {
        self.channels.list_fuel_surcharges().await
    }

    /// Sets a carrier's surcharge rate (percent) and stamps it with today's date.
    pub async fn update_fuel_surcharge(
        &self,
        carrier: &str,
        rate: f64,
    ) -> Result<FuelSurcharge, AppError> {
        let carrier = carrier.trim();
        if carrier.is_empty() {
            return Err(AppError::bad_request(
                "Carrier is required",
                json!({ "field": "carrier" }),
            ));
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(AppError::bad_request(
                "Fuel surcharge rate must be zero or more",
                json!({ "rate": rate }),
            ));
        }

        let updated = self
            .channels
            .upsert_fuel_surcharge(FuelSurcharge {
                carrier: carrier.to_string(),
                rate,
                last_updated: Utc::now().date_naive(),
            })
            .await?;
        info!(carrier = %updated.carrier, rate, "Fuel surcharge updated");
        Ok(updated)
    }

    async fn surcharges_if(&self, enabled: bool) -> Vec<FuelSurcharge> {
        if enabled {
            self.channels.list_fuel_surcharges().await
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::price_channel::{default_fuel_surcharges, default_price_channels};
    use crate::domain::repositories::MockPriceChannelRepository;

    fn service(repo: MockPriceChannelRepository) -> PricingService<MockPriceChannelRepository> {
        PricingService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_quote_with_and_without_surcharge() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_find_channel()
            .returning(|_| Ok(default_price_channels().into_iter().next()));
        repo.expect_list_fuel_surcharges()
            .times(1)
            .returning(default_fuel_surcharges);

        let svc = service(repo);

        let plain = svc.quote("us-dhl-air", 1.0, false).await.unwrap();
        assert_eq!(plain.total, 200.0);

        let with_fuel = svc.quote("us-dhl-air", 1.0, true).await.unwrap();
        assert_eq!(with_fuel.total, 249.0);
    }

    #[tokio::test]
    async fn test_quote_unknown_channel() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_find_channel().returning(|_| Ok(None));

        let err = service(repo).quote("nope", 1.0, false).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_quote_out_of_range_is_validation_error() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_find_channel()
            .returning(|_| Ok(default_price_channels().into_iter().nth(1)));

        let err = service(repo).quote("us-usps-small", 3.0, false).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_quote_all_sorted_and_skips_unserved() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_list_channels().returning(default_price_channels);

        let svc = service(repo);

        let quotes = svc.quote_all(Some("united states"), 0.5, false).await.unwrap();
        let ids: Vec<_> = quotes.iter().map(|q| q.channel_id.as_str()).collect();
        assert_eq!(ids, vec!["us-usps-small", "us-dhl-air"]);

        let heavy = svc.quote_all(None, 5.0, false).await.unwrap();
        assert_eq!(heavy.len(), 1);

        assert!(svc.quote_all(Some("Japan"), 1.0, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quote_all_rejects_bad_weight() {
        let svc = service(MockPriceChannelRepository::new());
        assert!(matches!(
            svc.quote_all(None, 0.0, false).await.unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_create_channel_generates_id_and_validates() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_create_channel()
            .withf(|c| !c.id.is_empty())
            .times(1)
            .returning(Ok);

        let svc = service(repo);

        let mut channel = default_price_channels().remove(0);
        channel.id = String::new();
        assert!(svc.create_channel(channel.clone()).await.is_ok());

        channel.unit_kg = 0.0;
        let err = svc.create_channel(channel).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_channel_uses_path_id() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_replace_channel()
            .withf(|c| c.id == "us-dhl-air")
            .returning(|c| Ok(Some(c)));

        let mut channel = default_price_channels().remove(0);
        channel.id = "ignored".to_string();
        let updated = service(repo)
            .update_channel("us-dhl-air", channel)
            .await
            .unwrap();
        assert_eq!(updated.id, "us-dhl-air");
    }

    #[tokio::test]
    async fn test_delete_missing_channel() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_delete_channel().returning(|_| Ok(false));

        let err = service(repo).delete_channel("x").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_fuel_surcharge() {
        let mut repo = MockPriceChannelRepository::new();
        repo.expect_upsert_fuel_surcharge()
            .withf(|s| s.carrier == "DHL" && s.last_updated == Utc::now().date_naive())
            .returning(Ok);

        let svc = service(repo);
        assert_eq!(svc.update_fuel_surcharge(" DHL ", 22.0).await.unwrap().rate, 22.0);
        assert!(svc.update_fuel_surcharge("DHL", -1.0).await.is_err());
        assert!(svc.update_fuel_surcharge("", 1.0).await.is_err());
    }
}
