//! Built-in health probes.
//!
//! Two probes ship with the scaffold: [`MemoryCheck`] for the in-process
//! store and [`HttpCheck`] for a remote HTTP dependency. Both translate
//! their own failures into unhealthy [`CheckResult`]s instead of raising.

use std::time::Duration;

use async_trait::async_trait;

use crate::health::{CheckResult, HealthCheck};

/// Default per-request timeout for [`HttpCheck`].
const HTTP_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe for the in-process memory store.
///
/// The store cannot fail independently of the process, so this probe reports
/// healthy whenever it runs at all. It exists so readiness output itemizes
/// the storage dependency alongside real external ones.
#[derive(Debug, Default)]
pub struct MemoryCheck;

impl MemoryCheck {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HealthCheck for MemoryCheck {
    fn name(&self) -> &str {
        "memory_store"
    }

    async fn check(&self) -> CheckResult {
        CheckResult::healthy("memory store operational")
    }
}

/// Probe that issues a GET against a remote endpoint.
///
/// Any 2xx response is healthy; other statuses and transport errors are
/// unhealthy with the diagnostic attached. The underlying client carries its
/// own request timeout so a dead endpoint cannot hang a check round.
#[derive(Debug)]
pub struct HttpCheck {
    client: reqwest::Client,
    endpoint: String,
    name: String,
}

impl HttpCheck {
    /// Create a probe named `name` targeting `endpoint`.
    pub fn new(endpoint: impl Into<String>, name: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(HTTP_PROBE_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.into(),
            name: name.into(),
        }
    }
}

#[async_trait]
impl HealthCheck for HttpCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> CheckResult {
        let response = match self.client.get(&self.endpoint).send().await {
            Ok(response) => response,
            Err(e) => {
                return CheckResult::unhealthy("endpoint request failed")
                    .with_error(e.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            CheckResult::healthy(format!("endpoint responding with status {}", status.as_u16()))
        } else {
            CheckResult::unhealthy(format!("endpoint returned status {}", status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthStatus;

    #[tokio::test]
    async fn test_memory_check_always_healthy() {
        let check = MemoryCheck::new();
        assert_eq!(check.name(), "memory_store");

        let result = check.check().await;
        assert_eq!(result.status, HealthStatus::Healthy);
        assert_eq!(result.message, "memory store operational");
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_http_check_unreachable_endpoint_is_unhealthy() {
        // Nothing listens on this port; the connection is refused quickly.
        let check = HttpCheck::new("http://127.0.0.1:1/health", "upstream");
        assert_eq!(check.name(), "upstream");

        let result = check.check().await;
        assert_eq!(result.status, HealthStatus::Unhealthy);
        assert_eq!(result.message, "endpoint request failed");
        assert!(result.error.is_some());
    }
}
