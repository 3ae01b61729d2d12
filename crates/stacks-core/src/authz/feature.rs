//! The feature trait and the built-in feature set.

use std::sync::Arc;

use thiserror::Error;

use super::decision::Decision;
use crate::object::{Actor, ObjectRef, ObjectType};
use crate::store::{ItemStore, ObjectDirectory};

/// A fault raised by a feature evaluator.
///
/// Faults never escape the resolver; they are captured and reported as
/// [`Decision::EvaluationError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("feature evaluator fault: {reason}")]
pub struct EvalFault {
    /// Why the evaluator failed.
    pub reason: String,
}

impl EvalFault {
    /// Creates a fault with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Read-only store access available to feature evaluators.
///
/// Evaluators are pure: the context is the only side door, and it exposes
/// nothing but lookups.
pub struct EvalContext<'a> {
    /// Existence checks across all object types.
    pub directory: &'a dyn ObjectDirectory,
    /// Item lookups, for features sensitive to item state flags.
    pub items: &'a dyn ItemStore,
}

/// A named, stateless capability predicate.
///
/// Implementations must be pure functions of their inputs plus read-only
/// store state. Names are stable identifiers used inside composite grant
/// identifiers and must not contain `_`.
///
/// Evaluators report "cannot answer" through the error channel, not
/// through [`Decision::EvaluationError`]; the resolver owns that mapping.
pub trait Feature: Send + Sync {
    /// The stable feature name.
    fn name(&self) -> &'static str;

    /// The object types this feature applies to. Targets of any other type
    /// resolve to [`Decision::NotApplicable`] without the evaluator
    /// running.
    fn supported_types(&self) -> &'static [ObjectType];

    /// Evaluates the feature for the pair.
    ///
    /// # Errors
    ///
    /// Returns [`EvalFault`] if the evaluator cannot produce a decision;
    /// the resolver captures the fault.
    fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        actor: Option<&Actor>,
        target: &ObjectRef,
    ) -> Result<Decision, EvalFault>;
}

/// Returns the built-in feature set.
#[must_use]
pub fn builtin_features() -> Vec<Arc<dyn Feature>> {
    vec![
        Arc::new(AlwaysTrue),
        Arc::new(AlwaysFalse),
        Arc::new(AlwaysRaise),
        Arc::new(TrueForAdmins),
        Arc::new(TrueForLoggedUsers),
        Arc::new(CanChangePassword),
    ]
}

/// Grants for every pair, including anonymous actors.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysTrue;

impl Feature for AlwaysTrue {
    fn name(&self) -> &'static str {
        "alwaystrue"
    }

    fn supported_types(&self) -> &'static [ObjectType] {
        &ObjectType::ALL
    }

    fn evaluate(
        &self,
        _ctx: &EvalContext<'_>,
        _actor: Option<&Actor>,
        _target: &ObjectRef,
    ) -> Result<Decision, EvalFault> {
        Ok(Decision::Granted)
    }
}

/// Actively denies every pair.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysFalse;

impl Feature for AlwaysFalse {
    fn name(&self) -> &'static str {
        "alwaysfalse"
    }

    fn supported_types(&self) -> &'static [ObjectType] {
        &ObjectType::ALL
    }

    fn evaluate(
        &self,
        _ctx: &EvalContext<'_>,
        _actor: Option<&Actor>,
        _target: &ObjectRef,
    ) -> Result<Decision, EvalFault> {
        Ok(Decision::Denied)
    }
}

/// Faults on every evaluation; exercises the capture path.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysRaise;

impl Feature for AlwaysRaise {
    fn name(&self) -> &'static str {
        "alwaysraise"
    }

    fn supported_types(&self) -> &'static [ObjectType] {
        &ObjectType::ALL
    }

    fn evaluate(
        &self,
        _ctx: &EvalContext<'_>,
        _actor: Option<&Actor>,
        _target: &ObjectRef,
    ) -> Result<Decision, EvalFault> {
        Err(EvalFault::new("alwaysraise never evaluates"))
    }
}

/// Holds for actors with the site-wide admin role; not applicable to
/// anyone else.
#[derive(Debug, Clone, Copy)]
pub struct TrueForAdmins;

impl Feature for TrueForAdmins {
    fn name(&self) -> &'static str {
        "trueforadmins"
    }

    fn supported_types(&self) -> &'static [ObjectType] {
        &ObjectType::ALL
    }

    fn evaluate(
        &self,
        _ctx: &EvalContext<'_>,
        actor: Option<&Actor>,
        _target: &ObjectRef,
    ) -> Result<Decision, EvalFault> {
        if actor.is_some_and(|a| a.is_admin) {
            Ok(Decision::Granted)
        } else {
            Ok(Decision::NotApplicable)
        }
    }
}

/// Holds for any authenticated actor.
#[derive(Debug, Clone, Copy)]
pub struct TrueForLoggedUsers;

impl Feature for TrueForLoggedUsers {
    fn name(&self) -> &'static str {
        "trueforloggedusers"
    }

    fn supported_types(&self) -> &'static [ObjectType] {
        &ObjectType::ALL
    }

    fn evaluate(
        &self,
        _ctx: &EvalContext<'_>,
        actor: Option<&Actor>,
        _target: &ObjectRef,
    ) -> Result<Decision, EvalFault> {
        if actor.is_some() {
            Ok(Decision::Granted)
        } else {
            Ok(Decision::NotApplicable)
        }
    }
}

/// Holds when the actor targets their own account.
#[derive(Debug, Clone, Copy)]
pub struct CanChangePassword;

impl Feature for CanChangePassword {
    fn name(&self) -> &'static str {
        "canchangepassword"
    }

    fn supported_types(&self) -> &'static [ObjectType] {
        &[ObjectType::EPerson]
    }

    fn evaluate(
        &self,
        _ctx: &EvalContext<'_>,
        actor: Option<&Actor>,
        target: &ObjectRef,
    ) -> Result<Decision, EvalFault> {
        if actor.is_some_and(|a| a.id == target.id) {
            Ok(Decision::Granted)
        } else {
            Ok(Decision::NotApplicable)
        }
    }
}
