//! DTOs for package endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use super::pagination::{PaginationMeta, PaginationParams};
use crate::domain::entities::{NewPackage, Package, PackageFilter, PackagePatch, PackageStatus};

/// Request body for `POST /api/packages`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    #[validate(length(min = 1, max = 64))]
    pub tracking_number: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub owner: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub shelf: String,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,

    /// Defaults to `in_stock`.
    pub status: Option<PackageStatus>,

    /// Kilograms.
    #[validate(range(exclusive_min = 0.0, max = 10000.0))]
    pub weight: Option<f64>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl From<CreatePackageRequest> for NewPackage {
    fn from(r: CreatePackageRequest) -> Self {
        NewPackage {
            tracking_number: r.tracking_number,
            owner: r.owner,
            shelf: r.shelf,
            tags: r.tags,
            status: r.status,
            weight: r.weight,
            notes: r.notes,
        }
    }
}

/// Request body for `PATCH /api/packages/{id}`.
///
/// Absent fields are left unchanged; `weight: null` and `notes: null` clear them.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackageRequest {
    #[validate(length(min = 1, max = 64))]
    pub tracking_number: Option<String>,

    #[validate(length(max = 100))]
    pub owner: Option<String>,

    #[validate(length(max = 50))]
    pub shelf: Option<String>,

    #[validate(length(max = 20))]
    pub tags: Option<Vec<String>>,

    pub status: Option<PackageStatus>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub weight: Option<Option<f64>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl From<UpdatePackageRequest> for PackagePatch {
    fn from(r: UpdatePackageRequest) -> Self {
        PackagePatch {
            tracking_number: r.tracking_number,
            owner: r.owner,
            shelf: r.shelf,
            tags: r.tags,
            status: r.status,
            weight: r.weight,
            notes: r.notes,
        }
    }
}

/// Query parameters for `GET /api/packages`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PackageQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    pub search: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub status: Option<PackageStatus>,

    pub owner: Option<String>,

    pub shelf: Option<String>,
}

impl PackageQueryParams {
    pub fn filter(&self) -> PackageFilter {
        PackageFilter {
            search: self.search.clone(),
            status: self.status,
            owner: self.owner.clone().filter(|o| !o.is_empty()),
            shelf: self.shelf.clone().filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackageListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<Package>,
}

/// Request body for `POST /api/packages/batch/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchStatusRequest {
    #[validate(length(min = 1, max = 1000))]
    pub ids: Vec<String>,
    pub status: PackageStatus,
}

/// Request body for `POST /api/packages/batch/delete`.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchDeleteRequest {
    #[validate(length(min = 1, max = 1000))]
    pub ids: Vec<String>,
}

/// Request body for `POST /api/packages/export`.
///
/// With `ids` exactly those packages are exported; otherwise the filter applies.
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    pub ids: Option<Vec<String>>,
    pub search: Option<String>,
    pub status: Option<PackageStatus>,
    pub owner: Option<String>,
    pub shelf: Option<String>,
}

impl ExportRequest {
    pub fn filter(&self) -> PackageFilter {
        PackageFilter {
            search: self.search.clone(),
            status: self.status,
            owner: self.owner.clone(),
            shelf: self.shelf.clone(),
        }
    }
}
