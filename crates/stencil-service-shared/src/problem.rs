//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use stencil_lib::Error as DomainError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for entities that do not exist.
pub const PROBLEM_ENTITY_NOT_FOUND: &str = "/problems/entity-not-found";

/// Problem type URI for identifier conflicts on creation.
pub const PROBLEM_ENTITY_EXISTS: &str = "/problems/entity-exists";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., failing readiness).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// Provides a consistent format for error responses across all endpoints.
///
/// # Example
///
/// ```
/// use stencil_service_shared::{ProblemDetails, PROBLEM_ENTITY_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_ENTITY_NOT_FOUND,
///     "Entity Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("No entity with id 'u1'")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for a missing entity.
    pub fn entity_not_found(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ENTITY_NOT_FOUND,
            "Entity Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No entity with id '{}'", id))
        .with_request_id(request_id)
    }

    /// Create a 409 Conflict problem for an identifier collision.
    pub fn entity_exists(id: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ENTITY_EXISTS,
            "Entity Already Exists",
            StatusCode::CONFLICT,
        )
        .with_detail(format!("An entity with id '{}' already exists", id))
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Set the content-type header to application/problem+json
        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert domain errors to ProblemDetails.
///
/// The `request_id` must be provided separately since domain errors don't
/// carry one. `AlreadyExists` maps to 409, `EntityNotFound` to 404, and the
/// validation variants to 400; anything else is a 500.
pub fn from_domain_error(error: &DomainError, request_id: &str) -> ProblemDetails {
    match error {
        DomainError::EntityNotFound => {
            // The handler usually knows the id; fall back to the bare title.
            ProblemDetails::new(
                PROBLEM_ENTITY_NOT_FOUND,
                "Entity Not Found",
                StatusCode::NOT_FOUND,
            )
            .with_detail(error.to_string())
            .with_request_id(request_id)
        }
        DomainError::AlreadyExists { id } => ProblemDetails::entity_exists(id, request_id),
        DomainError::InvalidEntityId | DomainError::InvalidEmail | DomainError::InvalidName => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        DomainError::ReservedName => {
            ProblemDetails::bad_request("The requested name is reserved", request_id)
        }
    }
}
