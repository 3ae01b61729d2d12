//! Authorization error taxonomy.

use thiserror::Error;
use uuid::Uuid;

use super::grant::GrantIdParseError;
use crate::fault::FaultClass;
use crate::store::StoreError;

/// Errors surfaced by grant resolution.
///
/// Each variant maps to exactly one [`FaultClass`]; the boundary renders
/// the class, never the internal detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthzError {
    /// An anonymous requester asked to view an actor-scoped grant.
    #[error("authentication required to view grant {id}")]
    NotAuthenticated {
        /// Canonical identifier of the requested grant.
        id: String,
    },

    /// An authenticated requester asked to view a grant they are not
    /// entitled to see.
    #[error("actor {requester} may not view grants of actor {owner}")]
    Forbidden {
        /// The requesting actor.
        requester: Uuid,
        /// The grant's owning actor.
        owner: Uuid,
    },

    /// A well-formed reference to a grant that does not resolve: a missing
    /// actor or target, an unregistered feature, or a feature that does
    /// not hold.
    #[error("grant not found: {id}")]
    GrantNotFound {
        /// Canonical identifier of the requested grant.
        id: String,
    },

    /// The grant identifier could not be parsed.
    #[error("malformed grant identifier: {0}")]
    Malformed(#[from] GrantIdParseError),

    /// The feature evaluator faulted while resolving the grant.
    #[error("feature '{feature}' failed evaluation")]
    Evaluation {
        /// The faulting feature.
        feature: String,
    },

    /// A collaborator store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthzError {
    /// Returns the status class for this error.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        match self {
            Self::NotAuthenticated { .. } => FaultClass::NotAuthenticated,
            Self::Forbidden { .. } => FaultClass::Forbidden,
            Self::GrantNotFound { .. } => FaultClass::NotFound,
            Self::Malformed(err) => err.class(),
            Self::Evaluation { .. } => FaultClass::EvaluationError,
            Self::Store(err) => err.class(),
        }
    }
}
