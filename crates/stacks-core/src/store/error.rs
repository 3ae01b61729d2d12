//! Store-seam error types.

use thiserror::Error;
use uuid::Uuid;

use crate::fault::FaultClass;

/// Errors produced by the collaborator stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The record kind (e.g. `item`, `collection`).
        kind: &'static str,
        /// The identifier that missed.
        id: Uuid,
    },

    /// A record with this identifier already exists.
    #[error("{kind} already exists: {id}")]
    AlreadyExists {
        /// The record kind.
        kind: &'static str,
        /// The duplicate identifier.
        id: Uuid,
    },

    /// The operation would violate a store constraint.
    #[error("store constraint violated: {reason}")]
    ConstraintViolation {
        /// Why the operation was refused.
        reason: String,
    },
}

impl StoreError {
    /// Returns the status class for this error.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        match self {
            Self::NotFound { .. } => FaultClass::NotFound,
            Self::AlreadyExists { .. } | Self::ConstraintViolation { .. } => FaultClass::Conflict,
        }
    }
}
