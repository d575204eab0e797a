//! Repository trait for price channels and fuel surcharges.

use crate::domain::entities::{FuelSurcharge, PriceChannel};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceChannelRepository: Send + Sync {
    async fn list_channels(&self) -> Vec<PriceChannel>;

    async fn find_channel(&self, id: &str) -> Result<Option<PriceChannel>, AppError>;

    /// Appends a channel.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is taken.
    async fn create_channel(&self, channel: PriceChannel) -> Result<PriceChannel, AppError>;

    /// Replaces the channel with the same id. Returns `None` if it does not exist.
    async fn replace_channel(&self, channel: PriceChannel)
    -> Result<Option<PriceChannel>, AppError>;

    /// Returns `true` if a channel was removed.
    async fn delete_channel(&self, id: &str) -> Result<bool, AppError>;

    async fn list_fuel_surcharges(&self) -> Vec<FuelSurcharge>;

    /// Inserts or replaces the surcharge for `surcharge.carrier` (case-insensitive).
    async fn upsert_fuel_surcharge(
        &self,
        surcharge: FuelSurcharge,
    ) -> Result<FuelSurcharge, AppError>;
}
