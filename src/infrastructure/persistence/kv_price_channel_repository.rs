//! Key-value implementation of the price channel repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::WarehouseDocuments;
use crate::domain::entities::{FuelSurcharge, PriceChannel};
use crate::domain::repositories::PriceChannelRepository;
use crate::error::AppError;

pub struct KvPriceChannelRepository {
    docs: Arc<WarehouseDocuments>,
}

impl KvPriceChannelRepository {
    pub fn new(docs: Arc<WarehouseDocuments>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl PriceChannelRepository for KvPriceChannelRepository {
    async fn list_channels(&self) -> Vec<PriceChannel> {
        self.docs.price_channels.load().await
    }

    async fn find_channel(&self, id: &str) -> Result<Option<PriceChannel>, AppError> {
        let channels = self.docs.price_channels.try_load().await?;
        Ok(channels.into_iter().find(|c| c.id == id))
    }

    async fn create_channel(&self, channel: PriceChannel) -> Result<PriceChannel, AppError> {
        self.docs
            .price_channels
            .update(move |channels| {
                if channels.iter().any(|c| c.id == channel.id) {
                    return Err(AppError::conflict(
                        "Price channel already exists",
                        json!({ "id": channel.id }),
                    ));
                }
                channels.push(channel.clone());
                Ok(channel)
            })
            .await
    }

    async fn replace_channel(
        &self,
        channel: PriceChannel,
    ) -> Result<Option<PriceChannel>, AppError> {
        self.docs
            .price_channels
            .update(move |channels| {
                Ok(channels.iter_mut().find(|c| c.id == channel.id).map(|c| {
                    *c = channel;
                    c.clone()
                }))
            })
            .await
    }

    async fn delete_channel(&self, id: &str) -> Result<bool, AppError> {
        self.docs
            .price_channels
            .update(|channels| {
                let before = channels.len();
                channels.retain(|c| c.id != id);
                Ok(channels.len() != before)
            })
            .await
    }

    async fn list_fuel_surcharges(&self) -> Vec<FuelSurcharge> {
        self.docs.fuel_surcharges.load().await
    }

    async fn upsert_fuel_surcharge(
        &self,
        surcharge: FuelSurcharge,
    ) -> Result<FuelSurcharge, AppError> {
        self.docs
            .fuel_surcharges
            .update(move |surcharges| {
                match surcharges
                    .iter_mut()
                    .find(|s| s.carrier.eq_ignore_ascii_case(&surcharge.carrier))
                {
                    Some(existing) => {
                        existing.rate = surcharge.rate;
                        existing.last_updated = surcharge.last_updated;
                        Ok(existing.clone())
                    }
                    None => {
                        surcharges.push(surcharge.clone());
                        Ok(surcharge)
                    }
                }
            })
            .await
    }
}
