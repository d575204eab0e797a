//! Package entity: one parcel received into the warehouse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    InStock,
    OutForDelivery,
    Pending,
    Delivered,
    Signed,
    Deleted,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 6] = [
        PackageStatus::InStock,
        PackageStatus::Pending,
        PackageStatus::OutForDelivery,
        PackageStatus::Delivered,
        PackageStatus::Signed,
        PackageStatus::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageStatus::InStock => "in_stock",
            PackageStatus::OutForDelivery => "out_for_delivery",
            PackageStatus::Pending => "pending",
            PackageStatus::Delivered => "delivered",
            PackageStatus::Signed => "signed",
            PackageStatus::Deleted => "deleted",
        }
    }

    /// Packages in these states can be put into a shipment.
    pub fn is_shippable(&self) -> bool {
        matches!(self, PackageStatus::InStock | PackageStatus::Pending)
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown package status '{}'", s))
    }
}

/// A parcel stored in the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub tracking_number: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub shelf: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: PackageStatus,
    pub entry_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Package {
    /// Name of the shelf this package currently takes a slot on, if any.
    ///
    /// Only in-stock packages with a shelf assignment count towards occupancy.
    pub fn occupied_shelf(&self) -> Option<&str> {
        (self.status == PackageStatus::InStock && !self.shelf.is_empty())
            .then_some(self.shelf.as_str())
    }

    /// Case-insensitive match against tracking number, owner, shelf and tags.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.tracking_number.to_lowercase().contains(&needle)
            || self.owner.to_lowercase().contains(&needle)
            || self.shelf.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Input data for package intake.
#[derive(Debug, Clone, Default)]
pub struct NewPackage {
    pub tracking_number: String,
    pub owner: String,
    pub shelf: String,
    pub tags: Vec<String>,
    pub status: Option<PackageStatus>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

/// Partial update for an existing package.
///
/// `weight: Some(None)` clears the weight; the same applies to `notes`.
#[derive(Debug, Clone, Default)]
pub struct PackagePatch {
    pub tracking_number: Option<String>,
    pub owner: Option<String>,
    pub shelf: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PackageStatus>,
    pub weight: Option<Option<f64>>,
    pub notes: Option<Option<String>>,
}

impl PackagePatch {
    pub fn status(status: PackageStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Applies the patch in place.
    pub fn apply(self, package: &mut Package) {
        if let Some(v) = self.tracking_number {
            package.tracking_number = v;
        }
        if let Some(v) = self.owner {
            package.owner = v;
        }
        if let Some(v) = self.shelf {
            package.shelf = v;
        }
        if let Some(v) = self.tags {
            package.tags = v;
        }
        if let Some(v) = self.status {
            package.status = v;
        }
        if let Some(v) = self.weight {
            package.weight = v;
        }
        if let Some(v) = self.notes {
            package.notes = v;
        }
    }
}

/// Listing criteria; every present field must match.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    /// Case-insensitive substring over tracking number, owner, shelf and tags.
    pub search: Option<String>,
    pub status: Option<PackageStatus>,
    pub owner: Option<String>,
    pub shelf: Option<String>,
}

impl PackageFilter {
    pub fn matches(&self, package: &Package) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim)
            && !term.is_empty()
            && !package.matches_search(term)
        {
            return false;
        }
        if self.status.is_some_and(|s| s != package.status) {
            return false;
        }
        if self.owner.as_ref().is_some_and(|o| *o != package.owner) {
            return false;
        }
        if self.shelf.as_ref().is_some_and(|s| *s != package.shelf) {
            return false;
        }
        true
    }
}

/// Form memory of the previous intake, offered as defaults for the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Package {
        Package {
            id: "p1".to_string(),
            tracking_number: "DHL123456789".to_string(),
            owner: "Alice".to_string(),
            shelf: "A1".to_string(),
            tags: vec!["Fragile".to_string()],
            status: PackageStatus::InStock,
            entry_time: Utc::now(),
            weight: Some(1.5),
            notes: None,
        }
    }

    #[test]
    fn test_status_roundtrip_names() {
        for status in PackageStatus::ALL {
            assert_eq!(status.as_str().parse::<PackageStatus>().unwrap(), status);
        }
        assert!("lost".parse::<PackageStatus>().is_err());
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["trackingNumber"], "DHL123456789");
        assert_eq!(json["status"], "in_stock");
        assert!(json.get("entryTime").is_some());
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_deserialize_document_written_by_browser_tool() {
        let raw = r#"{
            "id": "lq2abc",
            "trackingNumber": "SF100",
            "owner": "Bob",
            "shelf": "B2",
            "tags": ["urgent"],
            "status": "out_for_delivery",
            "entryTime": "2024-01-20T08:15:00.000Z"
        }"#;
        let pkg: Package = serde_json::from_str(raw).unwrap();
        assert_eq!(pkg.status, PackageStatus::OutForDelivery);
        assert!(pkg.weight.is_none());
    }

    #[test]
    fn test_occupied_shelf() {
        let mut pkg = sample();
        assert_eq!(pkg.occupied_shelf(), Some("A1"));

        pkg.status = PackageStatus::Pending;
        assert_eq!(pkg.occupied_shelf(), None);

        pkg.status = PackageStatus::InStock;
        pkg.shelf.clear();
        assert_eq!(pkg.occupied_shelf(), None);
    }

    #[test]
    fn test_matches_search() {
        let pkg = sample();
        assert!(pkg.matches_search("dhl"));
        assert!(pkg.matches_search("ALI"));
        assert!(pkg.matches_search("a1"));
        assert!(pkg.matches_search("frag"));
        assert!(!pkg.matches_search("ups"));
    }

    #[test]
    fn test_filter_matches() {
        let pkg = sample();
        assert!(PackageFilter::default().matches(&pkg));

        let by_search = PackageFilter {
            search: Some("  ".to_string()),
            status: Some(PackageStatus::InStock),
            ..Default::default()
        };
        assert!(by_search.matches(&pkg));

        let wrong_owner = PackageFilter {
            owner: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(!wrong_owner.matches(&pkg));

        let wrong_status = PackageFilter {
            search: Some("dhl".to_string()),
            status: Some(PackageStatus::Delivered),
            ..Default::default()
        };
        assert!(!wrong_status.matches(&pkg));
    }

    #[test]
    fn test_patch_apply() {
        let mut pkg = sample();
        PackagePatch {
            owner: Some("Carol".to_string()),
            weight: Some(None),
            notes: Some(Some("leave at door".to_string())),
            ..Default::default()
        }
        .apply(&mut pkg);

        assert_eq!(pkg.owner, "Carol");
        assert!(pkg.weight.is_none());
        assert_eq!(pkg.notes.as_deref(), Some("leave at door"));
        assert_eq!(pkg.shelf, "A1");
    }
}
