//! Shelf management and occupancy reporting.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{NewShelf, Shelf, ShelfPatch};
use crate::domain::repositories::{PackageRepository, ShelfRepository};
use crate::error::AppError;

fn clean_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(
            "Shelf name is required",
            json!({ "field": "name" }),
        ));
    }
    Ok(name.to_string())
}

fn check_capacity(capacity: u32) -> Result<(), AppError> {
    if capacity == 0 {
        return Err(AppError::bad_request(
            "Shelf capacity must be at least 1",
            json!({ "capacity": capacity }),
        ));
    }
    Ok(())
}

pub struct ShelfService<H: ShelfRepository, P: PackageRepository> {
    shelves: Arc<H>,
    packages: Arc<P>,
}

impl<H: ShelfRepository, P: PackageRepository> ShelfService<H, P> {
    pub fn new(shelves: Arc<H>, packages: Arc<P>) -> Self {
        Self { shelves, packages }
    }

    pub async fn list(&self) -> Vec<Shelf> {
        self.shelves.list().await
    }

    pub async fn create(&self, shelf: NewShelf) -> Result<Shelf, AppError> {
        check_capacity(shelf.capacity)?;
        let created = self
            .shelves
            .create(NewShelf {
                name: clean_name(&shelf.name)?,
                location: shelf.location.trim().to_string(),
                capacity: shelf.capacity,
            })
            .await?;
        info!(id = %created.id, name = %created.name, "Shelf created");
        Ok(created)
    }

    /// Edits a shelf. Packages keep the shelf name they were stored with.
    pub async fn update(&self, id: &str, patch: ShelfPatch) -> Result<Shelf, AppError> {
        if let Some(capacity) = patch.capacity {
            check_capacity(capacity)?;
        }
        let patch = ShelfPatch {
            name: patch.name.as_deref().map(clean_name).transpose()?,
            location: patch.location.map(|l| l.trim().to_string()),
            capacity: patch.capacity,
        };

        self.shelves
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Shelf not found", json!({ "id": id })))
    }

    /// Deletes an empty shelf.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while packages are counted on the shelf.
    pub async fn delete(&self, id: &str) -> Result<Shelf, AppError> {
        let removed = self
            .shelves
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Shelf not found", json!({ "id": id })))?;
        info!(id, name = %removed.name, "Shelf deleted");
        Ok(removed)
    }

    /// Adds `delta` to the named shelf's counter, clamped at zero.
    pub async fn adjust(&self, name: &str, delta: i64) -> Result<(), AppError> {
        self.shelves
            .adjust_counts(vec![(name.to_string(), delta)])
            .await
    }

    /// Recomputes every counter from the packages currently in stock.
    pub async fn recount(&self) -> Result<Vec<Shelf>, AppError> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for package in self.packages.list().await {
            if let Some(shelf) = package.occupied_shelf() {
                *counts.entry(shelf.to_string()).or_default() += 1;
            }
        }
        let shelves = self.shelves.set_counts(counts).await?;
        info!(shelves = shelves.len(), "Shelf counters recomputed");
        Ok(shelves)
    }

    /// Shelves whose free capacity is at or below `threshold`.
    pub async fn alerts(&self, threshold: u32) -> Vec<Shelf> {
        self.shelves
            .list()
            .await
            .into_iter()
            .filter(|s| s.free_capacity() <= threshold)
            .collect()
    }
}
