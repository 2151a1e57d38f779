//! Common error types used across the workspace.
//!
//! Each failure class has its own typed error; [`DevmonError`] joins them via
//! `#[from]` so every layer can propagate with `?`. Adapters box their own
//! error types into [`DevmonError::Storage`].

use std::error::Error as StdError;

/// Top-level error returned by services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum DevmonError {
    /// Input failed a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A uniqueness rule would be violated.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// A device already holds the maximum number of batteries.
    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceededError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("{field} must be a non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Lookup by id (or name) found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A record with the same unique name already exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} named {name:?} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub name: String,
}

/// Attaching one more battery would exceed the per-device limit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {device_id} already has the maximum of {limit} batteries")]
pub struct CapacityExceededError {
    pub device_id: String,
    pub limit: usize,
}
