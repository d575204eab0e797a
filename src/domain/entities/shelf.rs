//! Shelf entity: a physical storage slot.

use serde::{Deserialize, Serialize};

/// A storage slot with a capacity and the number of packages currently on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    pub id: String,
    pub name: String,
    pub location: String,
    pub capacity: u32,
    pub current_count: u32,
}

impl Shelf {
    /// Free slots left; zero when over capacity.
    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.current_count)
    }

    /// Occupancy in percent, rounded to one decimal.
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        let pct = f64::from(self.current_count) * 100.0 / f64::from(self.capacity);
        (pct * 10.0).round() / 10.0
    }

    /// Adds `delta` to the count, never going below zero.
    pub fn adjust(&mut self, delta: i64) {
        let next = i64::from(self.current_count).saturating_add(delta);
        self.current_count = next.clamp(0, i64::from(u32::MAX)) as u32;
    }
}

/// Input for creating a shelf.
#[derive(Debug, Clone)]
pub struct NewShelf {
    pub name: String,
    pub location: String,
    pub capacity: u32,
}

/// Partial shelf update.
#[derive(Debug, Clone, Default)]
pub struct ShelfPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<u32>,
}

/// Shelves present before the operator configures any.
pub fn default_shelves() -> Vec<Shelf> {
    [
        ("1", "A1", "Zone A, No.1"),
        ("2", "A2", "Zone A, No.2"),
        ("3", "B1", "Zone B, No.1"),
        ("4", "B2", "Zone B, No.2"),
    ]
    .into_iter()
    .map(|(id, name, location)| Shelf {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        capacity: 100,
        current_count: 0,
    })
    .collect()
}
