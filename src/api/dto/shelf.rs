//! DTOs for shelf endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{NewShelf, Shelf, ShelfPatch};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateShelfRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: String,
    #[validate(range(min = 1, max = 100000))]
    pub capacity: u32,
}

impl From<CreateShelfRequest> for NewShelf {
    fn from(r: CreateShelfRequest) -> Self {
        NewShelf {
            name: r.name,
            location: r.location,
            capacity: r.capacity,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShelfRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 100000))]
    pub capacity: Option<u32>,
}

impl From<UpdateShelfRequest> for ShelfPatch {
    fn from(r: UpdateShelfRequest) -> Self {
        ShelfPatch {
            name: r.name,
            location: r.location,
            capacity: r.capacity,
        }
    }
}

/// Request body for `POST /api/shelves/adjust`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdjustShelfRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = -100000, max = 100000))]
    pub delta: i64,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    /// Free-slot threshold; defaults to the configured low-stock threshold.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub threshold: Option<u32>,
}

/// Shelf with derived occupancy figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfItem {
    #[serde(flatten)]
    pub shelf: Shelf,
    pub free_capacity: u32,
    pub utilization: f64,
}

impl From<Shelf> for ShelfItem {
    fn from(shelf: Shelf) -> Self {
        ShelfItem {
            free_capacity: shelf.free_capacity(),
            utilization: shelf.utilization(),
            shelf,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShelfListResponse {
    pub items: Vec<ShelfItem>,
}
