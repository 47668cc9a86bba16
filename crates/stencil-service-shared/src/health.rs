//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses. Liveness checks nothing beyond the process being able
//! to answer; readiness polls every registered probe through the
//! [`stencil_lib::HealthManager`] and itemizes the results.

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use stencil_lib::{CheckResult, HealthStatus};

use crate::AppState;

/// Budget for one readiness round, shared by all probes in the round.
const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessStatus {
    /// Always "pass" when the process can answer at all.
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// RFC 3339 timestamp of this response.
    pub timestamp: String,
}

impl LivenessStatus {
    /// Create a passing liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "pass".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One probe's contribution to the readiness body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Probe outcome: healthy or unhealthy.
    pub status: HealthStatus,

    /// Human-readable summary from the probe.
    pub message: String,

    /// Diagnostic error text, present only for failed probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall-clock duration of the probe invocation, in milliseconds.
    pub latency_ms: f64,
}

impl From<CheckResult> for ProbeReport {
    fn from(result: CheckResult) -> Self {
        Self {
            status: result.status,
            message: result.message,
            error: result.error,
            latency_ms: result.latency.as_secs_f64() * 1000.0,
        }
    }
}

/// Readiness response body with the per-probe breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessStatus {
    /// Overall status: "pass" or "fail".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Per-probe results keyed by probe name.
    pub checks: HashMap<String, ProbeReport>,
}

impl ReadinessStatus {
    /// Build the readiness body from a round of probe results.
    pub fn from_results(
        service: &str,
        version: &str,
        results: HashMap<String, CheckResult>,
    ) -> Self {
        let healthy = results.values().all(CheckResult::is_healthy);

        Self {
            status: if healthy { "pass" } else { "fail" }.to_string(),
            service: service.to_string(),
            version: version.to_string(),
            checks: results
                .into_iter()
                .map(|(name, result)| (name, ProbeReport::from(result)))
                .collect(),
        }
    }

    /// True if every probe in the round passed.
    pub fn is_pass(&self) -> bool {
        self.status == "pass"
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running. This does not depend on
/// external resources.
///
/// # Example
///
/// ```text
/// GET /health/live
/// {"status":"pass","service":"examples","version":"0.1.0","timestamp":"..."}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = LivenessStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Polls every registered probe with a shared 5 second budget and returns
/// the per-probe breakdown. Any unhealthy probe turns the aggregate into a
/// 503 so the orchestrator stops routing traffic here, while the itemized
/// results stay available for operator diagnosis.
///
/// # Example
///
/// ```text
/// GET /health/ready
/// {"status":"pass","service":"examples","version":"0.1.0","checks":{"memory_store":{...}}}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let results = state.health().check_all(READINESS_TIMEOUT).await;
    let status = ReadinessStatus::from_results(service, version, results);

    if !status.is_pass() {
        let failed: Vec<&str> = status
            .checks
            .iter()
            .filter(|(_, report)| report.status == HealthStatus::Unhealthy)
            .map(|(name, _)| name.as_str())
            .collect();
        tracing::warn!(failed = ?failed, "readiness check failed");

        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    (StatusCode::OK, Json(status)).into_response()
}
