//! The `Example` domain entity and its creation rules.
//!
//! This is the single entity the scaffold demonstrates: a record addressed
//! by a caller-supplied string identifier with an email and a display name.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::HasId;

/// The demonstration entity persisted by the scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Caller-supplied identifier, unique within one repository.
    pub id: String,
    /// Contact email address.
    pub email: String,
    /// Display name.
    pub name: String,
}

impl Example {
    /// Construct a validated entity.
    ///
    /// Rejects empty identifiers, empty names, and structurally invalid
    /// email addresses, each with its own [`Error`] variant.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let email = email.into();
        let name = name.into();

        if id.is_empty() {
            return Err(Error::InvalidEntityId);
        }
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        if !is_valid_email(&email) {
            return Err(Error::InvalidEmail);
        }

        Ok(Self { id, email, name })
    }
}

impl HasId for Example {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Structural email check: non-empty local part, a single `@`, and a domain
/// containing a dot with non-empty labels around it.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && !domain.chars().any(char::is_whitespace)
}

/// Seam for pre-creation policy checks, so the use case can be exercised
/// with a permissive or rejecting checker in tests.
pub trait EntityChecker: Send + Sync {
    /// Decide whether the entity may be created.
    fn check_for_creation(&self, example: &Example) -> Result<()>;
}

/// Default creation policy: the name `admin` is reserved.
#[derive(Debug, Default)]
pub struct ExampleService;

impl ExampleService {
    pub fn new() -> Self {
        Self
    }
}

impl EntityChecker for ExampleService {
    fn check_for_creation(&self, example: &Example) -> Result<()> {
        if example.name.eq_ignore_ascii_case("admin") {
            return Err(Error::ReservedName);
        }
        Ok(())
    }
}
