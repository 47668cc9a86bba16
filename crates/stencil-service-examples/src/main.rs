//! Example-entity CRUD HTTP microservice.
//!
//! This service exposes the scaffold's demonstration entity over a small
//! REST API backed by the in-memory repository.
//!
//! # Endpoints
//!
//! - `POST /api/v1/examples` - Create an entity
//! - `GET /api/v1/examples/{id}` - Fetch an entity by id
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `SERVICE_HOST` - Bind address (default: 0.0.0.0)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `HEALTHCHECK_URL` - Optional upstream endpoint to probe for readiness

use std::env;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};

use stencil_lib::{
    Error as DomainError, Example, ExampleService, Examples, HealthManager, HttpCheck,
    MemoryCheck, MemoryExampleRepository,
};
use stencil_service_shared::{
    extract_or_generate_request_id, from_domain_error, health_live, health_ready, init_logging,
    init_metrics, metrics_handler, record_entity_created, record_entity_fetched,
    record_entity_operation_failed, AppState, CreateExampleRequest, LoggingConfig, MetricsConfig,
    MetricsLayer, ProblemDetails, ServiceConfig, ServiceResponse, Validate,
};

const SERVICE_NAME: &str = "examples";

/// HTTP response - either success at a given status or RFC 9457 error.
#[derive(Debug)]
enum ApiResponse {
    Created(ServiceResponse<Example>),
    Ok(ServiceResponse<Example>),
    Error(ProblemDetails),
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Created(body) => (StatusCode::CREATED, Json(body)).into_response(),
            ApiResponse::Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service(SERVICE_NAME);
    init_logging(&logging_config);

    // Initialize metrics
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();

    // Assemble the object graph with plain constructor calls: repository,
    // creation policy, use case, probe registry, shared state.
    let examples = Examples::new(
        Arc::new(MemoryExampleRepository::new()),
        Arc::new(ExampleService::new()),
    );

    let health = HealthManager::new();
    health.register(Arc::new(MemoryCheck::new()));
    if let Ok(url) = env::var("HEALTHCHECK_URL") {
        info!(url = %url, "registering upstream health probe");
        health.register(Arc::new(HttpCheck::new(url, "upstream")));
    }

    let state = AppState::new(examples, health);

    let addr = config.addr();
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Build the service router.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/examples", post(create_example))
        .route("/api/v1/examples/{id}", get(get_example))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Failure reason label for the metrics counter.
fn failure_reason(error: &DomainError) -> &'static str {
    match error {
        DomainError::AlreadyExists { .. } => "conflict",
        DomainError::EntityNotFound => "not_found",
        DomainError::InvalidEntityId
        | DomainError::InvalidEmail
        | DomainError::InvalidName
        | DomainError::ReservedName => "validation_error",
    }
}

/// Handle POST /api/v1/examples requests.
async fn create_example(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateExampleRequest>,
) -> ApiResponse {
    let request_id = extract_or_generate_request_id(&headers);

    info!(
        request_id = %request_id,
        entity_id = %request.id,
        "handling create request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_entity_operation_failed("create", "validation_error");
        return ApiResponse::Error(*problem);
    }

    match state
        .examples()
        .create(&request.id, &request.email, &request.name)
        .await
    {
        Ok(example) => {
            record_entity_created(SERVICE_NAME);
            info!(
                request_id = %request_id,
                entity_id = %example.id,
                "entity created"
            );
            ApiResponse::Created(ServiceResponse::new(example))
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "entity creation failed");
            record_entity_operation_failed("create", failure_reason(&e));
            ApiResponse::Error(from_domain_error(&e, request_id.as_str()))
        }
    }
}

/// Handle GET /api/v1/examples/{id} requests.
async fn get_example(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResponse {
    let request_id = extract_or_generate_request_id(&headers);

    info!(request_id = %request_id, entity_id = %id, "handling get request");

    match state.examples().get(&id).await {
        Ok(example) => {
            record_entity_fetched(SERVICE_NAME);
            ApiResponse::Ok(ServiceResponse::new(example))
        }
        Err(DomainError::EntityNotFound) => {
            record_entity_operation_failed("get", "not_found");
            ApiResponse::Error(ProblemDetails::entity_not_found(&id, request_id.as_str()))
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "entity fetch failed");
            record_entity_operation_failed("get", failure_reason(&e));
            ApiResponse::Error(from_domain_error(&e, request_id.as_str()))
        }
    }
}
