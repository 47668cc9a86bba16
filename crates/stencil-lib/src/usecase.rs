//! Use-case layer for `Example` entities.
//!
//! Thin orchestration over the repository port and the creation checker:
//! validation and policy run before anything touches storage, and domain
//! errors propagate to the caller unchanged.

use std::sync::Arc;

use crate::error::Result;
use crate::example::{EntityChecker, Example};
use crate::repository::ExampleRepository;

/// Application service for creating and fetching entities.
///
/// Collaborators arrive fully built through the constructor; the service
/// holds them behind trait objects so transports and tests can swap in
/// whatever backing they need.
#[derive(Clone)]
pub struct Examples {
    repo: Arc<dyn ExampleRepository>,
    checker: Arc<dyn EntityChecker>,
}

impl Examples {
    pub fn new(repo: Arc<dyn ExampleRepository>, checker: Arc<dyn EntityChecker>) -> Self {
        Self { repo, checker }
    }

    /// Validate, policy-check, and persist a new entity.
    pub async fn create(&self, id: &str, email: &str, name: &str) -> Result<Example> {
        tracing::debug!(entity_id = id, email = email, "creating entity");

        let example = Example::new(id, email, name).inspect_err(|e| {
            tracing::warn!(entity_id = id, error = %e, "invalid entity data provided");
        })?;

        self.checker.check_for_creation(&example).inspect_err(|e| {
            tracing::warn!(entity_id = id, error = %e, "entity creation check failed");
        })?;

        self.repo.save(example.clone()).await?;

        Ok(example)
    }

    /// Fetch the entity stored under `id`.
    pub async fn get(&self, id: &str) -> Result<Example> {
        tracing::debug!(entity_id = id, "getting entity");

        self.repo.get_by_id(id).await
    }
}

impl std::fmt::Debug for Examples {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Examples").finish_non_exhaustive()
    }
}
