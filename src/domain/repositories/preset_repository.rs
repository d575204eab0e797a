//! Repository trait for presets, last-entry memory and system settings.

use crate::domain::entities::{LastEntry, PackageStatus, PresetList, StatusLabel, SystemSettings};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresetRepository: Send + Sync {
    async fn list(&self, list: PresetList) -> Vec<String>;

    /// Appends `value` and returns the updated list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the value is already present.
    async fn add(&self, list: PresetList, value: String) -> Result<Vec<String>, AppError>;

    /// Removes `value`; returns `false` if it was not present.
    async fn remove(&self, list: PresetList, value: String) -> Result<bool, AppError>;

    async fn statuses(&self) -> Vec<StatusLabel>;

    /// Sets the label of one status and returns the updated labels.
    async fn set_status_label(
        &self,
        status: PackageStatus,
        label: String,
    ) -> Result<Vec<StatusLabel>, AppError>;

    async fn reset_statuses(&self) -> Result<Vec<StatusLabel>, AppError>;

    async fn last_entry(&self) -> LastEntry;

    async fn save_last_entry(&self, entry: LastEntry) -> Result<(), AppError>;

    async fn settings(&self) -> SystemSettings;

    async fn save_settings(&self, settings: SystemSettings) -> Result<SystemSettings, AppError>;
}
