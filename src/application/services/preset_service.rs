//! Preset lists, status labels and system settings.

use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::domain::entities::{LastEntry, PackageStatus, PresetList, StatusLabel, SystemSettings};
use crate::domain::repositories::PresetRepository;
use crate::error::AppError;

pub struct PresetService<R: PresetRepository> {
    repository: Arc<R>,
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(
            format!("{} must not be empty", field),
            json!({ "field": field }),
        ));
    }
    Ok(value.to_string())
}

impl<R: PresetRepository> PresetService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, list: PresetList) -> Vec<String> {
        self.repository.list(list).await
    }

    /// Adds a trimmed, non-empty, not yet present value.
    pub async fn add(&self, list: PresetList, value: &str) -> Result<Vec<String>, AppError> {
        let value = required(value, "value")?;
        let values = self.repository.add(list, value.clone()).await?;
        info!(list = list.as_str(), value, "Preset added");
        Ok(values)
    }

    pub async fn remove(&self, list: PresetList, value: &str) -> Result<(), AppError> {
        if !self.repository.remove(list, value.to_string()).await? {
            return Err(AppError::not_found(
                "Preset not found",
                json!({ "list": list.as_str(), "value": value }),
            ));
        }
        info!(list = list.as_str(), value, "Preset removed");
        Ok(())
    }

    pub async fn statuses(&self) -> Vec<StatusLabel> {
        self.repository.statuses().await
    }

    pub async fn set_status_label(
        &self,
        status: PackageStatus,
        label: &str,
    ) -> Result<Vec<StatusLabel>, AppError> {
        let label = required(label, "label")?;
        self.repository.set_status_label(status, label).await
    }

    pub async fn reset_statuses(&self) -> Result<Vec<StatusLabel>, AppError> {
        self.repository.reset_statuses().await
    }

    pub async fn last_entry(&self) -> LastEntry {
        self.repository.last_entry().await
    }

    pub async fn settings(&self) -> SystemSettings {
        self.repository.settings().await
    }

    /// Replaces the settings after validation.
    ///
    /// A blank contact email is stored as unset.
    pub async fn update_settings(
        &self,
        mut settings: SystemSettings,
    ) -> Result<SystemSettings, AppError> {
        settings.company_name = settings.company_name.trim().to_string();
        if settings
            .contact_email
            .as_deref()
            .is_some_and(|e| e.trim().is_empty())
        {
            settings.contact_email = None;
        }
        settings.validate()?;

        let saved = self.repository.save_settings(settings).await?;
        info!("System settings updated");
        Ok(saved)
    }
}
