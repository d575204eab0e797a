//! Key-value implementation of the shelf repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use super::WarehouseDocuments;
use crate::domain::entities::{NewShelf, Shelf, ShelfPatch};
use crate::domain::repositories::ShelfRepository;
use crate::error::AppError;
use crate::utils::id::generate_id;

pub struct KvShelfRepository {
    docs: Arc<WarehouseDocuments>,
}

impl KvShelfRepository {
    pub fn new(docs: Arc<WarehouseDocuments>) -> Self {
        Self { docs }
    }
}

fn name_taken(name: &str) -> AppError {
    AppError::conflict("Shelf name already exists", json!({ "name": name }))
}

#[async_trait]
impl ShelfRepository for KvShelfRepository {
    async fn list(&self) -> Vec<Shelf> {
        self.docs.shelves.load().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Shelf>, AppError> {
        let shelves = self.docs.shelves.try_load().await?;
        Ok(shelves.into_iter().find(|s| s.id == id))
    }

    async fn create(&self, shelf: NewShelf) -> Result<Shelf, AppError> {
        self.docs
            .shelves
            .update(move |shelves| {
                if shelves.iter().any(|s| s.name == shelf.name) {
                    return Err(name_taken(&shelf.name));
                }
                let created = Shelf {
                    id: generate_id(),
                    name: shelf.name,
                    location: shelf.location,
                    capacity: shelf.capacity,
                    current_count: 0,
                };
                shelves.push(created.clone());
                Ok(created)
            })
            .await
    }

    async fn update(&self, id: &str, patch: ShelfPatch) -> Result<Option<Shelf>, AppError> {
        self.docs
            .shelves
            .update(|shelves| {
                if let Some(name) = &patch.name
                    && shelves.iter().any(|s| s.id != id && &s.name == name)
                {
                    return Err(name_taken(name));
                }

                let Some(shelf) = shelves.iter_mut().find(|s| s.id == id) else {
                    return Ok(None);
                };
                if let Some(name) = patch.name {
                    shelf.name = name;
                }
                if let Some(location) = patch.location {
                    shelf.location = location;
                }
                if let Some(capacity) = patch.capacity {
                    shelf.capacity = capacity;
                }
                Ok(Some(shelf.clone()))
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<Option<Shelf>, AppError> {
        self.docs
            .shelves
            .update(|shelves| {
                let Some(idx) = shelves.iter().position(|s| s.id == id) else {
                    return Ok(None);
                };
                let count = shelves[idx].current_count;
                if count > 0 {
                    return Err(AppError::conflict(
                        "Shelf still holds packages",
                        json!({ "id": id, "current_count": count }),
                    ));
                }
                Ok(Some(shelves.remove(idx)))
            })
            .await
    }

    async fn adjust_counts(&self, deltas: Vec<(String, i64)>) -> Result<(), AppError> {
        if deltas.iter().all(|(_, delta)| *delta == 0) {
            return Ok(());
        }
        self.docs
            .shelves
            .update(move |shelves| {
                for (name, delta) in deltas {
                    if let Some(shelf) = shelves.iter_mut().find(|s| s.name == name) {
                        shelf.adjust(delta);
                    }
                }
                Ok(())
            })
            .await
    }

    async fn set_counts(&self, counts: HashMap<String, u32>) -> Result<Vec<Shelf>, AppError> {
        self.docs
            .shelves
            .update(move |shelves| {
                for shelf in shelves.iter_mut() {
                    shelf.current_count = counts.get(&shelf.name).copied().unwrap_or(0);
                }
                Ok(shelves.clone())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;

    fn repo() -> KvShelfRepository {
        let docs = WarehouseDocuments::new(Arc::new(MemoryStore::new()));
        KvShelfRepository::new(Arc::new(docs))
    }

    fn new_shelf(name: &str) -> NewShelf {
        NewShelf {
            name: name.to_string(),
            location: "Zone C".to_string(),
            capacity: 20,
        }
    }

    #[tokio::test]
    async fn test_defaults_are_seeded() {
        assert_eq!(repo().list().await.len(), 4);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let repo = repo();
        let shelf = repo.create(new_shelf("C1")).await.unwrap();
        assert_eq!(shelf.current_count, 0);

        let err = repo.create(new_shelf("C1")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        let err = repo.create(new_shelf("A1")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_rename_conflict_and_self_rename() {
        let repo = repo();
        let patch = |name: &str| ShelfPatch {
            name: Some(name.to_string()),
            ..Default::default()
        };

        let err = repo.update("1", patch("A2")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        let same = repo.update("1", patch("A1")).await.unwrap().unwrap();
        assert_eq!(same.name, "A1");
        assert!(repo.update("missing", patch("Z9")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_adjust_counts_clamps_and_ignores_unknown() {
        let repo = repo();
        repo.adjust_counts(vec![
            ("A1".to_string(), 3),
            ("B2".to_string(), -4),
            ("ZZ".to_string(), 7),
        ])
        .await
        .unwrap();

        let shelves = repo.list().await;
        let count = |name: &str| {
            shelves
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.current_count)
        };
        assert_eq!(count("A1"), Some(3));
        assert_eq!(count("B2"), Some(0));
    }

    #[tokio::test]
    async fn test_set_counts_zeroes_missing() {
        let repo = repo();
        repo.adjust_counts(vec![("A2".to_string(), 5)]).await.unwrap();

        let shelves = repo
            .set_counts(HashMap::from([("A1".to_string(), 2)]))
            .await
            .unwrap();

        for shelf in shelves {
            let expected = if shelf.name == "A1" { 2 } else { 0 };
            assert_eq!(shelf.current_count, expected);
        }
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo();
        assert_eq!(repo.delete("1").await.unwrap().unwrap().name, "A1");
        assert!(repo.delete("1").await.unwrap().is_none());
        assert_eq!(repo.list().await.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_occupied_shelf_is_conflict() {
        let repo = repo();
        repo.adjust_counts(vec![("A2".to_string(), 1)]).await.unwrap();

        let err = repo.delete("2").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.list().await.len(), 4);
    }
}
