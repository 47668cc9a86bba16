//! Test utilities for microservice handler testing.
//!
//! Provides a pre-wired in-memory [`AppState`] so handler tests never touch
//! real dependencies.

use std::sync::Arc;

use stencil_lib::{ExampleService, Examples, HealthManager, MemoryCheck, MemoryExampleRepository};

use crate::state::AppState;

/// Build a fresh in-memory application state.
///
/// The state carries an empty repository, the default creation policy, and
/// a health registry with only the memory probe, so every test starts from
/// a clean slate.
pub fn test_state() -> AppState {
    let examples = Examples::new(
        Arc::new(MemoryExampleRepository::new()),
        Arc::new(ExampleService::new()),
    );

    let health = HealthManager::new();
    health.register(Arc::new(MemoryCheck::new()));

    AppState::new(examples, health)
}

/// Build a state with a caller-supplied health registry.
pub fn test_state_with_health(health: HealthManager) -> AppState {
    let examples = Examples::new(
        Arc::new(MemoryExampleRepository::new()),
        Arc::new(ExampleService::new()),
    );

    AppState::new(examples, health)
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-{}", timestamp)
}
