//! Repository trait for shelves.

use crate::domain::entities::{NewShelf, Shelf, ShelfPatch};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Repository interface for shelves and their occupancy counters.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::KvShelfRepository`] - key-value document
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShelfRepository: Send + Sync {
    async fn list(&self) -> Vec<Shelf>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Shelf>, AppError>;

    /// Creates a shelf with an empty counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a shelf with the same name exists.
    async fn create(&self, shelf: NewShelf) -> Result<Shelf, AppError>;

    /// Applies `patch` to one shelf.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new name belongs to another shelf.
    async fn update(&self, id: &str, patch: ShelfPatch) -> Result<Option<Shelf>, AppError>;

    /// Removes an empty shelf and returns it, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the stored counter is above zero.
    async fn delete(&self, id: &str) -> Result<Option<Shelf>, AppError>;

    /// Adds signed deltas to shelf counters by shelf name.
    ///
    /// Counters are clamped at zero; unknown names are ignored.
    async fn adjust_counts(&self, deltas: Vec<(String, i64)>) -> Result<(), AppError>;

    /// Overwrites every counter from `counts`; shelves missing from the map get zero.
    async fn set_counts(&self, counts: HashMap<String, u32>) -> Result<Vec<Shelf>, AppError>;
}
