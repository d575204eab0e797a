//! Repository trait for package records.

use crate::domain::entities::{Package, PackagePatch, PackageStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// A package before and after a mutation.
pub type PackageChange = (Package, Package);

/// Repository interface for the package collection.
///
/// Packages are kept newest first.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvPackageRepository`] - key-value document
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Returns every package, newest first.
    ///
    /// Unreadable storage yields an empty list.
    async fn list(&self) -> Vec<Package>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Package>, AppError>;

    /// Inserts a package at the front of the collection.
    async fn insert(&self, package: Package) -> Result<Package, AppError>;

    /// Applies `patch` to one package.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((before, after)))` if the package exists
    /// - `Ok(None)` if it does not
    async fn update(&self, id: &str, patch: PackagePatch)
    -> Result<Option<PackageChange>, AppError>;

    /// Sets the status of every existing package in `ids`. Unknown ids are skipped.
    async fn set_status(
        &self,
        ids: &[String],
        status: PackageStatus,
    ) -> Result<Vec<PackageChange>, AppError>;

    /// Moves every package in `ids` out for delivery, all or nothing.
    ///
    /// Availability is checked against the stored packages under the
    /// document lock. Changes come back in `ids` order.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if an id does not exist
    /// - [`AppError::Conflict`] if a package is not in stock or pending
    async fn claim_for_shipment(&self, ids: &[String]) -> Result<Vec<PackageChange>, AppError>;

    /// Removes every existing package in `ids` and returns the removed records.
    async fn delete(&self, ids: &[String]) -> Result<Vec<Package>, AppError>;
}
