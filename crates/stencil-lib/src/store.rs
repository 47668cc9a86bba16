//! Generic in-memory keyed store.
//!
//! [`MemoryStore`] is a mutex-guarded map used as a drop-in substitute for a
//! durable repository in tests and demos. It enforces identifier uniqueness
//! on insert and exposes the usual CRUD surface plus `list`/`count`.
//!
//! Writes take the exclusive lock, reads the shared lock; every operation
//! holds its lock for the full call, so no caller ever observes a
//! half-applied mutation. Lock hold times are bounded by single map
//! operations, so there is no cancellation story here.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

/// Capability required of stored records: a stable string identifier,
/// supplied by the entity itself and never generated by the store.
pub trait HasId {
    /// The identifier this record is keyed by.
    fn id(&self) -> &str;
}

/// Errors returned by [`MemoryStore`] operations.
///
/// Exactly two kinds exist and both carry the offending identifier. Callers
/// distinguish them by pattern match, never by message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this identifier is already present.
    #[error("record with id '{id}' already exists")]
    AlreadyExists { id: String },

    /// No record exists for this identifier.
    #[error("no record with id '{id}'")]
    NotFound { id: String },
}

/// In-memory store keyed by the record's own identifier.
///
/// The map is exclusively owned by the store; reads hand out clones, so no
/// caller ever holds a reference into its internals.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<HashMap<String, T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: HasId + Clone> MemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, T>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, T>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new record under its identifier.
    ///
    /// The existence check and the insert happen under one write lock, so of
    /// two concurrent saves for the same identifier exactly one succeeds and
    /// the other sees [`StoreError::AlreadyExists`].
    pub fn save(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.write();

        let id = record.id().to_string();
        if records.contains_key(&id) {
            return Err(StoreError::AlreadyExists { id });
        }

        records.insert(id, record);
        Ok(())
    }

    /// Fetch a copy of the record stored under `id`.
    pub fn get_by_id(&self, id: &str) -> Result<T, StoreError> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Replace the record stored under the record's identifier.
    ///
    /// Never creates: updating an absent identifier is
    /// [`StoreError::NotFound`].
    pub fn update(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.write();

        let id = record.id().to_string();
        if !records.contains_key(&id) {
            return Err(StoreError::NotFound { id });
        }

        records.insert(id, record);
        Ok(())
    }

    /// Remove the record stored under `id`.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.write();

        if records.remove(id).is_none() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        Ok(())
    }

    /// Copies of all stored records, in unspecified order.
    pub fn list(&self) -> Vec<T> {
        self.read().values().cloned().collect()
    }

    /// Number of currently stored records.
    pub fn count(&self) -> usize {
        self.read().len()
    }
}
