//! Preset lists and system settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::package::PackageStatus;

/// Display label for a package status, used in listings and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusLabel {
    pub value: PackageStatus,
    pub label: String,
}

pub fn default_statuses() -> Vec<StatusLabel> {
    [
        (PackageStatus::InStock, "Inbound"),
        (PackageStatus::Pending, "Awaiting dispatch"),
        (PackageStatus::OutForDelivery, "Outbound"),
        (PackageStatus::Delivered, "Dispatched"),
        (PackageStatus::Signed, "Signed"),
        (PackageStatus::Deleted, "Deleted"),
    ]
    .into_iter()
    .map(|(value, label)| StatusLabel {
        value,
        label: label.to_string(),
    })
    .collect()
}

/// Label for `status`, falling back to its wire name.
pub fn label_for(labels: &[StatusLabel], status: PackageStatus) -> String {
    labels
        .iter()
        .find(|l| l.value == status)
        .map(|l| l.label.clone())
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Editable string lists offered as choices during intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetList {
    Owners,
    Tags,
}

impl PresetList {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetList::Owners => "owners",
            PresetList::Tags => "tags",
        }
    }

    pub fn defaults(&self) -> Vec<String> {
        match self {
            PresetList::Owners => default_owners(),
            PresetList::Tags => default_tags(),
        }
    }
}

pub fn default_owners() -> Vec<String> {
    vec![
        "Zhang San".to_string(),
        "Li Si".to_string(),
        "Wang Wu".to_string(),
    ]
}

pub fn default_tags() -> Vec<String> {
    vec![
        "urgent".to_string(),
        "fragile".to_string(),
        "important".to_string(),
        "normal".to_string(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    pub fn as_duration(&self) -> chrono::Duration {
        match self {
            BackupFrequency::Daily => chrono::Duration::days(1),
            BackupFrequency::Weekly => chrono::Duration::weeks(1),
            BackupFrequency::Monthly => chrono::Duration::days(30),
        }
    }
}

/// Operator-editable system settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSettings {
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    pub company_address: String,
    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,
    pub contact_phone: String,
    pub notifications_enabled: bool,
    pub email_notifications: bool,
    pub low_stock_alert: bool,
    #[validate(range(min = 1, max = 100))]
    pub low_stock_threshold: u32,
    pub auto_backup: bool,
    pub backup_frequency: BackupFrequency,
    pub auto_archive: bool,
    #[validate(range(min = 1))]
    pub archive_after_days: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            company_name: "International Parcel Warehouse".to_string(),
            company_address: String::new(),
            contact_email: None,
            contact_phone: String::new(),
            notifications_enabled: true,
            email_notifications: false,
            low_stock_alert: true,
            low_stock_threshold: 10,
            auto_backup: true,
            backup_frequency: BackupFrequency::Daily,
            auto_archive: false,
            archive_after_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for() {
        let labels = default_statuses();
        assert_eq!(label_for(&labels, PackageStatus::InStock), "Inbound");
        assert_eq!(label_for(&[], PackageStatus::Signed), "signed");
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(SystemSettings::default().validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = SystemSettings::default();
        settings.low_stock_threshold = 0;
        assert!(settings.validate().is_err());

        settings.low_stock_threshold = 101;
        assert!(settings.validate().is_err());

        settings.low_stock_threshold = 10;
        settings.contact_email = Some("not-an-email".to_string());
        assert!(settings.validate().is_err());

        settings.contact_email = Some("ops@example.com".to_string());
        settings.archive_after_days = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_settings_document_uses_defaults() {
        let settings: SystemSettings =
            serde_json::from_str(r#"{"companyName": "Depot", "backupFrequency": "weekly"}"#)
                .unwrap();
        assert_eq!(settings.company_name, "Depot");
        assert_eq!(settings.backup_frequency, BackupFrequency::Weekly);
        assert_eq!(settings.low_stock_threshold, 10);
    }
}
