//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request body for creating an example entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExampleRequest {
    /// Caller-supplied identifier for the new entity.
    pub id: String,

    /// Contact email address.
    pub email: String,

    /// Display name.
    pub name: String,
}

impl Validate for CreateExampleRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.id.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'id' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.email.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'email' field is required and cannot be empty",
                request_id,
            )));
        }

        // Structural shape only; the domain layer owns the full email rules.
        if !self.email.contains('@') {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'email' field must be a valid email address",
                request_id,
            )));
        }

        if self.name.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'name' field is required and cannot be empty",
                request_id,
            )));
        }

        Ok(())
    }
}
