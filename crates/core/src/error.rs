//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// None of these are fatal: every variant describes a rejected request that
/// leaves the rejecting aggregate unchanged and usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. level out of range, unknown rank).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The collection is already holding `capacity` entries.
    #[error("capacity exceeded: manager is full ({capacity} items)")]
    CapacityExceeded { capacity: usize },

    /// An identifier is already taken by another entry.
    #[error("duplicate identifier: {0}")]
    DuplicateId(ItemId),

    /// An identifier (or pair of identifiers) cannot be used for the request.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// No entry carries the requested identifier.
    #[error("not found: {0}")]
    NotFound(ItemId),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::CapacityExceeded { capacity }
    }

    pub fn duplicate_id(id: ItemId) -> Self {
        Self::DuplicateId(id)
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    pub fn not_found(id: ItemId) -> Self {
        Self::NotFound(id)
    }
}
