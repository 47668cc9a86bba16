use thiserror::Error;

/// Convenient result alias for the stencil domain library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level domain error type.
///
/// Every variant is terminal: callers translate them into transport-level
/// responses (HTTP 404, 409, 400) but never retry. Variants are matched by
/// pattern, never by message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No entity exists for the requested identifier.
    #[error("entity not found")]
    EntityNotFound,

    /// An entity with this identifier is already stored. Carries the
    /// conflicting identifier for diagnostics.
    #[error("entity with id '{id}' already exists")]
    AlreadyExists { id: String },

    /// Raised when constructing an entity with an empty identifier.
    #[error("entity id cannot be empty")]
    InvalidEntityId,

    /// Raised when constructing an entity with a malformed email address.
    #[error("invalid email format")]
    InvalidEmail,

    /// Raised when constructing an entity with an empty name.
    #[error("name cannot be empty")]
    InvalidName,

    /// Raised when the requested name is reserved for internal use.
    #[error("name is reserved")]
    ReservedName,
}
