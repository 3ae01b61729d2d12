//! Status classes shared across the kernel error taxonomy.
//!
//! Every error the kernel surfaces belongs to exactly one [`FaultClass`].
//! The HTTP boundary (out of scope for this crate) consumes the class to
//! pick a response status; nothing in this crate speaks HTTP itself.

use serde::{Deserialize, Serialize};

/// Machine-checkable classification of a kernel failure.
///
/// The mapping to status codes is part of the public contract:
///
/// | Class              | Status |
/// |--------------------|--------|
/// | `MalformedRequest` | 400    |
/// | `NotAuthenticated` | 401    |
/// | `Forbidden`        | 403    |
/// | `NotFound`         | 404    |
/// | `Conflict`         | 409    |
/// | `EvaluationError`  | 500    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultClass {
    /// The request could not be parsed (unparseable identifier, missing
    /// required parameter).
    MalformedRequest,
    /// No actor was presented and the operation requires one.
    NotAuthenticated,
    /// The actor is authenticated but not entitled to the operation.
    Forbidden,
    /// A well-formed reference to a non-existent or non-applicable
    /// entity, feature, or grant.
    NotFound,
    /// The operation lost a race or violates a uniqueness constraint
    /// (task already claimed, correction already open).
    Conflict,
    /// An evaluator or internal collaborator raised an unexpected fault.
    EvaluationError,
}

impl FaultClass {
    /// Returns the HTTP status code the boundary maps this class to.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::MalformedRequest => 400,
            Self::NotAuthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::EvaluationError => 500,
        }
    }
}

impl std::fmt::Display for FaultClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MalformedRequest => "MALFORMED_REQUEST",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::EvaluationError => "EVALUATION_ERROR",
        };
        write!(f, "{name}")
    }
}
