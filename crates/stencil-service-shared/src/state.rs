//! Application state for HTTP microservices.
//!
//! [`AppState`] bundles the fully-built domain collaborators that axum
//! handlers need. It is assembled once in `main` with plain constructor
//! calls and shared via axum's `State` extractor; there is no global
//! registry or service locator.

use std::sync::Arc;

use stencil_lib::{Examples, HealthManager};

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (using `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use stencil_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let examples = state.examples();
///     // ... use the use case
/// }
///
/// let state = AppState::new(examples, health);
/// let app = Router::new()
///     .route("/api/v1/examples/{id}", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    examples: Examples,
    health: HealthManager,
}

impl AppState {
    /// Assemble state from pre-built collaborators.
    pub fn new(examples: Examples, health: HealthManager) -> Self {
        Self {
            inner: Arc::new(AppStateInner { examples, health }),
        }
    }

    /// The example-entity use case.
    pub fn examples(&self) -> &Examples {
        &self.inner.examples
    }

    /// The health probe registry.
    pub fn health(&self) -> &HealthManager {
        &self.inner.health
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("health", &self.inner.health)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stencil_lib::{ExampleService, MemoryExampleRepository};

    fn state() -> AppState {
        let examples = Examples::new(
            Arc::new(MemoryExampleRepository::new()),
            Arc::new(ExampleService::new()),
        );
        AppState::new(examples, HealthManager::new())
    }

    #[tokio::test]
    async fn test_state_exposes_collaborators() {
        let state = state();

        state
            .examples()
            .create("u1", "a@b.com", "Alice")
            .await
            .unwrap();
        assert_eq!(state.examples().get("u1").await.unwrap().name, "Alice");

        assert!(state
            .health()
            .is_healthy(std::time::Duration::from_secs(1))
            .await);
    }

    #[test]
    fn test_state_clone_shares_inner() {
        let state1 = state();
        let state2 = state1.clone();

        // Both handles point at the same inner data.
        assert!(Arc::ptr_eq(&state1.inner, &state2.inner));
    }

    #[test]
    fn test_state_debug() {
        let debug = format!("{:?}", state());
        assert!(debug.contains("AppState"));
        assert!(debug.contains("health"));
    }
}
