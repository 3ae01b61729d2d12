//! Feature evaluation outcomes.

use serde::{Deserialize, Serialize};

use crate::fault::FaultClass;

/// The outcome of evaluating a feature for an `(actor, target)` pair.
///
/// Resolution is total: exactly one decision is produced for every input,
/// and with no intervening store mutation the same input yields the same
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// The feature holds; the grant exists.
    Granted,
    /// The feature is applicable but does not hold for this pair.
    Denied,
    /// The feature does not exist or does not apply to the target's type.
    NotApplicable,
    /// The evaluator raised a fault; captured, never propagated.
    EvaluationError,
}

impl Decision {
    /// Returns true if the grant exists.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns the status class a non-granting decision maps to, or `None`
    /// for [`Decision::Granted`] (rendered as a 200 by the boundary).
    #[must_use]
    pub const fn fault_class(self) -> Option<FaultClass> {
        match self {
            Self::Granted => None,
            Self::Denied => Some(FaultClass::Forbidden),
            Self::NotApplicable => Some(FaultClass::NotFound),
            Self::EvaluationError => Some(FaultClass::EvaluationError),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Granted => "GRANTED",
            Self::Denied => "DENIED",
            Self::NotApplicable => "NOT_APPLICABLE",
            Self::EvaluationError => "EVALUATION_ERROR",
        };
        write!(f, "{name}")
    }
}
