//! Repository port for `Example` entities and its in-memory adapter.
//!
//! The port is the seam where a durable backend would plug in; the scaffold
//! ships only the in-memory adapter backed by [`MemoryStore`]. The trait is
//! async because real adapters talk to the network, even though the memory
//! adapter never awaits anything.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::example::Example;
use crate::store::{MemoryStore, StoreError};

/// Persistence port consumed by the use-case layer.
#[async_trait]
pub trait ExampleRepository: Send + Sync {
    /// Persist a new entity. Fails with [`Error::AlreadyExists`] if the
    /// identifier is taken.
    async fn save(&self, example: Example) -> Result<()>;

    /// Fetch the entity stored under `id`, or [`Error::EntityNotFound`].
    async fn get_by_id(&self, id: &str) -> Result<Example>;
}

/// In-memory adapter over the generic keyed store.
///
/// Translates the store's sentinel errors into domain errors; everything
/// else passes through untouched.
#[derive(Debug)]
pub struct MemoryExampleRepository {
    store: MemoryStore<Example>,
}

impl Default for MemoryExampleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryExampleRepository {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    /// Direct access to the underlying store, for tests and demos that
    /// exercise the full CRUD surface.
    pub fn store(&self) -> &MemoryStore<Example> {
        &self.store
    }
}

#[async_trait]
impl ExampleRepository for MemoryExampleRepository {
    async fn save(&self, example: Example) -> Result<()> {
        self.store.save(example).map_err(|e| match e {
            StoreError::AlreadyExists { id } => Error::AlreadyExists { id },
            StoreError::NotFound { .. } => Error::EntityNotFound,
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Example> {
        self.store.get_by_id(id).map_err(|e| match e {
            StoreError::NotFound { .. } => Error::EntityNotFound,
            StoreError::AlreadyExists { id } => Error::AlreadyExists { id },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(id: &str, name: &str) -> Example {
        Example::new(id, "a@b.com", name).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = MemoryExampleRepository::new();
        repo.save(example("u1", "Alice")).await.unwrap();

        let fetched = repo.get_by_id("u1").await.unwrap();
        assert_eq!(fetched.name, "Alice");
    }

    #[tokio::test]
    async fn test_duplicate_save_maps_to_already_exists() {
        let repo = MemoryExampleRepository::new();
        repo.save(example("u1", "Alice")).await.unwrap();

        let err = repo.save(example("u1", "Mallory")).await.unwrap_err();
        assert_eq!(
            err,
            Error::AlreadyExists {
                id: "u1".to_string()
            }
        );

        // The first write wins.
        assert_eq!(repo.get_by_id("u1").await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_get_missing_maps_to_entity_not_found() {
        let repo = MemoryExampleRepository::new();
        let err = repo.get_by_id("ghost").await.unwrap_err();
        assert_eq!(err, Error::EntityNotFound);
    }

    #[tokio::test]
    async fn test_store_access_for_full_crud() {
        let repo = MemoryExampleRepository::new();
        repo.save(example("u1", "Alice")).await.unwrap();

        assert_eq!(repo.store().count(), 1);
        repo.store().delete("u1").unwrap();
        assert_eq!(repo.store().count(), 0);

        let err = repo.get_by_id("u1").await.unwrap_err();
        assert_eq!(err, Error::EntityNotFound);
    }
}
