//! Shared infrastructure for stencil HTTP microservices.
//!
//! This crate provides the HTTP glue used by service binaries:
//!
//! - [`AppState`]: assembled domain collaborators behind a cheap clone
//! - [`health`]: liveness/readiness handlers driving the probe registry
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`ServiceResponse`]: wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: structured JSON logging setup
//! - [`middleware`]: request tracking and metrics middleware
//! - [`config`]: environment-driven service configuration
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Services follow a thin-handler pattern: all domain logic lives in
//! `stencil-lib`, handlers only parse, validate, delegate, and format.
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a pre-wired in-memory state for
//! handler testing. Enable the `test-utils` feature to use it from
//! dependent crates.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, LivenessStatus, ProbeReport, ReadinessStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_entity_created, record_entity_fetched,
    record_entity_operation_failed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_domain_error, ProblemDetails, PROBLEM_ENTITY_EXISTS, PROBLEM_ENTITY_NOT_FOUND,
    PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{CreateExampleRequest, Validate};
pub use response::ServiceResponse;
pub use state::AppState;
