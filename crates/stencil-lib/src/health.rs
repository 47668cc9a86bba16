//! Health-check aggregation.
//!
//! [`HealthManager`] holds an ordered registry of named probes and produces a
//! point-in-time view of system health on demand. It keeps no state between
//! rounds: every [`HealthManager::check_all`] call is an independent poll.
//!
//! A probe's own failure is captured as data ([`CheckResult`]), never raised
//! from the aggregator, so one broken dependency cannot prevent the remaining
//! probes from being checked.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

/// Binary health status reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of a single probe invocation.
///
/// Produced fresh on every round and never persisted. `latency` is assigned
/// by the aggregator and reflects the wall-clock duration of the one
/// invocation that produced this result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Whether the probed dependency is usable.
    pub status: HealthStatus,
    /// Human-readable summary of the outcome.
    pub message: String,
    /// Diagnostic error text, present only for failed probes.
    pub error: Option<String>,
    /// Wall-clock duration of the probe invocation.
    pub latency: Duration,
}

impl CheckResult {
    /// A healthy result with the given summary.
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: message.into(),
            error: None,
            latency: Duration::ZERO,
        }
    }

    /// An unhealthy result with the given summary.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: message.into(),
            error: None,
            latency: Duration::ZERO,
        }
    }

    /// Attach diagnostic error text.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// True if this result reports [`HealthStatus::Healthy`].
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// A named, deadline-aware health probe for one dependency or subsystem.
///
/// Implementations must resolve within the deadline the aggregator applies to
/// each round; a probe that blocks past it is reported unhealthy rather than
/// allowed to hang the round (its future is dropped at the timeout).
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Name this probe's result is keyed by.
    fn name(&self) -> &str;

    /// Probe the dependency once.
    async fn check(&self) -> CheckResult;
}

/// Registry of named probes with on-demand aggregation.
///
/// Registration is safe concurrently with an in-flight round; a probe
/// registered mid-round joins the next round. Probes are registered once at
/// process start and never removed.
#[derive(Default)]
pub struct HealthManager {
    checks: RwLock<Vec<Arc<dyn HealthCheck>>>,
}

impl HealthManager {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            checks: RwLock::new(Vec::new()),
        }
    }

    /// Append a probe to the registry.
    pub fn register(&self, check: Arc<dyn HealthCheck>) {
        self.checks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(check);
    }

    /// Poll every registered probe and collect results keyed by probe name.
    ///
    /// Probes run sequentially in registration order against a deadline
    /// shared by the whole round; a probe still pending at the deadline
    /// yields an unhealthy result and the remaining probes are still
    /// invoked (observing the already-expired deadline). If two probes share
    /// a name, the later registration's result overwrites the earlier one.
    pub async fn check_all(&self, timeout: Duration) -> HashMap<String, CheckResult> {
        let checks: Vec<Arc<dyn HealthCheck>> = self
            .checks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let deadline = Instant::now() + timeout;
        let mut results = HashMap::with_capacity(checks.len());

        for check in checks {
            let start = Instant::now();
            let mut result = match tokio::time::timeout_at(deadline, check.check()).await {
                Ok(result) => result,
                Err(_) => CheckResult::unhealthy("probe timed out")
                    .with_error(format!("no response within {}ms", timeout.as_millis())),
            };
            result.latency = start.elapsed();

            results.insert(check.name().to_string(), result);
        }

        results
    }

    /// True iff no probe reports unhealthy. An empty registry is vacuously
    /// healthy.
    pub async fn is_healthy(&self, timeout: Duration) -> bool {
        self.check_all(timeout)
            .await
            .values()
            .all(CheckResult::is_healthy)
    }
}

impl std::fmt::Debug for HealthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .checks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("HealthManager")
            .field("registered", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND_TIMEOUT: Duration = Duration::from_secs(5);

    struct StaticCheck {
        name: &'static str,
        result: CheckResult,
        delay: Duration,
    }

    impl StaticCheck {
        fn new(name: &'static str, result: CheckResult) -> Self {
            Self {
                name,
                result,
                delay: Duration::from_millis(1),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl HealthCheck for StaticCheck {
        fn name(&self) -> &str {
            self.name
        }

        async fn check(&self) -> CheckResult {
            tokio::time::sleep(self.delay).await;
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_check_all_empty_registry() {
        let manager = HealthManager::new();

        let results = manager.check_all(ROUND_TIMEOUT).await;
        assert!(results.is_empty());
        assert!(manager.is_healthy(ROUND_TIMEOUT).await);
    }

    #[tokio::test]
    async fn test_check_all_single_healthy() {
        let manager = HealthManager::new();
        manager.register(Arc::new(StaticCheck::new(
            "database",
            CheckResult::healthy("connection successful"),
        )));

        let results = manager.check_all(ROUND_TIMEOUT).await;
        assert_eq!(results.len(), 1);

        let result = &results["database"];
        assert_eq!(result.status, HealthStatus::Healthy);
        assert_eq!(result.message, "connection successful");
        assert!(result.latency > Duration::ZERO);
    }

    #[tokio::test]
    async fn test_check_all_single_unhealthy() {
        let manager = HealthManager::new();
        manager.register(Arc::new(StaticCheck::new(
            "cache",
            CheckResult::unhealthy("connection failed").with_error("timeout"),
        )));

        let results = manager.check_all(ROUND_TIMEOUT).await;
        let result = &results["cache"];
        assert_eq!(result.status, HealthStatus::Unhealthy);
        assert_eq!(result.error.as_deref(), Some("timeout"));
        assert!(result.latency > Duration::ZERO);

        assert!(!manager.is_healthy(ROUND_TIMEOUT).await);
    }

    #[tokio::test]
    async fn test_check_all_mixed_probes_all_reported() {
        let manager = HealthManager::new();
        manager.register(Arc::new(StaticCheck::new(
            "db",
            CheckResult::healthy("ok"),
        )));
        manager.register(Arc::new(StaticCheck::new(
            "cache",
            CheckResult::unhealthy("unreachable").with_error("timeout"),
        )));

        let results = manager.check_all(ROUND_TIMEOUT).await;
        assert_eq!(results.len(), 2);
        assert!(results["db"].is_healthy());
        assert!(!results["cache"].is_healthy());
        assert!(!manager.is_healthy(ROUND_TIMEOUT).await);
    }

    #[tokio::test]
    async fn test_failing_probe_does_not_stop_later_probes() {
        let manager = HealthManager::new();
        manager.register(Arc::new(StaticCheck::new(
            "broken",
            CheckResult::unhealthy("down"),
        )));
        manager.register(Arc::new(StaticCheck::new(
            "fine",
            CheckResult::healthy("up"),
        )));

        let results = manager.check_all(ROUND_TIMEOUT).await;
        assert_eq!(results.len(), 2);
        assert!(results["fine"].is_healthy());
    }

    #[tokio::test]
    async fn test_duplicate_name_last_registered_wins() {
        let manager = HealthManager::new();
        manager.register(Arc::new(StaticCheck::new(
            "dep",
            CheckResult::healthy("first registration"),
        )));
        manager.register(Arc::new(StaticCheck::new(
            "dep",
            CheckResult::unhealthy("second registration"),
        )));

        let results = manager.check_all(ROUND_TIMEOUT).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results["dep"].message, "second registration");
    }

    #[tokio::test]
    async fn test_slow_probe_times_out_and_round_continues() {
        let manager = HealthManager::new();
        manager.register(Arc::new(
            StaticCheck::new("slow", CheckResult::healthy("never seen"))
                .with_delay(Duration::from_secs(30)),
        ));
        manager.register(Arc::new(StaticCheck::new(
            "fast",
            CheckResult::healthy("up"),
        )));

        let results = manager.check_all(Duration::from_millis(50)).await;
        assert_eq!(results.len(), 2);

        let slow = &results["slow"];
        assert_eq!(slow.status, HealthStatus::Unhealthy);
        assert!(slow.error.as_deref().unwrap().contains("no response"));

        // The expired deadline applies to later probes too, but they still
        // get invoked and reported.
        assert!(results.contains_key("fast"));
    }

    #[tokio::test]
    async fn test_register_during_round_joins_next_round() {
        let manager = Arc::new(HealthManager::new());
        manager.register(Arc::new(StaticCheck::new(
            "initial",
            CheckResult::healthy("ok"),
        )));

        let first = manager.check_all(ROUND_TIMEOUT).await;
        assert_eq!(first.len(), 1);

        manager.register(Arc::new(StaticCheck::new(
            "late",
            CheckResult::healthy("ok"),
        )));

        let second = manager.check_all(ROUND_TIMEOUT).await;
        assert_eq!(second.len(), 2);
        assert!(second.contains_key("late"));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }
}
