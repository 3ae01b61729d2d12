// AGENT-AUTHORED
//! Grant resolution over the feature registry.

use std::sync::Arc;

use tracing::{debug, warn};

use super::decision::Decision;
use super::error::AuthzError;
use super::feature::EvalContext;
use super::grant::{Grant, GrantId};
use super::registry::FeatureRegistry;
use crate::object::{Actor, ObjectRef};
use crate::store::{ActorStore, ItemStore, ObjectDirectory, StoreError};

/// Resolves feature decisions and grant views.
///
/// Resolution is read-only and side-effect-free; concurrent callers need
/// no coordination.
pub struct AuthorizationResolver {
    registry: Arc<FeatureRegistry>,
    directory: Arc<dyn ObjectDirectory>,
    actors: Arc<dyn ActorStore>,
    items: Arc<dyn ItemStore>,
}

impl AuthorizationResolver {
    /// Creates a resolver over the given registry and store seams.
    #[must_use]
    pub fn new(
        registry: Arc<FeatureRegistry>,
        directory: Arc<dyn ObjectDirectory>,
        actors: Arc<dyn ActorStore>,
        items: Arc<dyn ItemStore>,
    ) -> Self {
        Self {
            registry,
            directory,
            actors,
            items,
        }
    }

    /// Evaluates a feature for an `(actor, target)` pair.
    ///
    /// Total: always returns exactly one [`Decision`]. An unregistered
    /// feature name and an unsupported target type both resolve to
    /// [`Decision::NotApplicable`]; evaluator faults are captured and
    /// resolve to [`Decision::EvaluationError`].
    #[must_use]
    pub fn resolve(
        &self,
        actor: Option<&Actor>,
        feature_name: &str,
        target: &ObjectRef,
    ) -> Decision {
        let Some(feature) = self.registry.find(feature_name) else {
            return Decision::NotApplicable;
        };
        if !feature.supported_types().contains(&target.object_type) {
            return Decision::NotApplicable;
        }

        let ctx = EvalContext {
            directory: self.directory.as_ref(),
            items: self.items.as_ref(),
        };
        match feature.evaluate(&ctx, actor, target) {
            Ok(decision) => decision,
            Err(fault) => {
                warn!(
                    feature = feature_name,
                    target = %target,
                    %fault,
                    "feature evaluator fault captured"
                );
                Decision::EvaluationError
            },
        }
    }

    /// Returns the grant for `(actor, feature, target)` if the feature
    /// holds, `None` otherwise.
    #[must_use]
    pub fn find_grant(
        &self,
        actor: Option<&Actor>,
        feature_name: &str,
        target: &ObjectRef,
    ) -> Option<Grant> {
        if self.resolve(actor, feature_name, target).is_granted() {
            Some(Grant {
                id: GrantId::new(actor.map(|a| a.id), feature_name, *target),
            })
        } else {
            None
        }
    }

    /// Resolves a grant view request for an already-parsed identifier.
    ///
    /// Checks run in a fixed order:
    ///
    /// 1. resolvability: the referenced actor, target, and feature must
    ///    exist, else [`AuthzError::GrantNotFound`]
    /// 2. entitlement: an actor-scoped grant is visible to its own actor
    ///    and to admins; anonymous requesters get
    ///    [`AuthzError::NotAuthenticated`], other actors
    ///    [`AuthzError::Forbidden`]
    /// 3. decision: the feature must hold, else
    ///    [`AuthzError::GrantNotFound`]
    ///
    /// # Errors
    ///
    /// See the ordering above; store faults pass through as
    /// [`AuthzError::Store`].
    pub fn view_grant(
        &self,
        requester: Option<&Actor>,
        id: &GrantId,
    ) -> Result<Grant, AuthzError> {
        let not_found = || AuthzError::GrantNotFound {
            id: id.canonical(),
        };

        // Resolvability before entitlement: a reference to a missing
        // entity is not-found even for a requester who would otherwise be
        // forbidden.
        let grant_actor = match id.actor {
            Some(actor_id) => match self.actors.actor(actor_id) {
                Ok(actor) => Some(actor),
                Err(StoreError::NotFound { .. }) => return Err(not_found()),
                Err(err) => return Err(err.into()),
            },
            None => None,
        };
        if !self.directory.object_exists(&id.target())? {
            return Err(not_found());
        }
        if self.registry.find(&id.feature).is_none() {
            return Err(not_found());
        }

        if let Some(owner) = id.actor {
            match requester {
                None => {
                    return Err(AuthzError::NotAuthenticated {
                        id: id.canonical(),
                    })
                },
                Some(r) if !r.is_admin && r.id != owner => {
                    return Err(AuthzError::Forbidden {
                        requester: r.id,
                        owner,
                    })
                },
                Some(_) => {},
            }
        }

        let target = id.target();
        match self.resolve(grant_actor.as_ref(), &id.feature, &target) {
            Decision::Granted => {
                debug!(grant = %id, "grant resolved");
                Ok(Grant { id: id.clone() })
            },
            Decision::Denied | Decision::NotApplicable => Err(not_found()),
            Decision::EvaluationError => Err(AuthzError::Evaluation {
                feature: id.feature.clone(),
            }),
        }
    }

    /// Parses a raw identifier and resolves the view request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::Malformed`] for unparseable input, then the
    /// errors of [`Self::view_grant`].
    pub fn view_grant_str(
        &self,
        requester: Option<&Actor>,
        raw: &str,
    ) -> Result<Grant, AuthzError> {
        let id = GrantId::parse(raw)?;
        self.view_grant(requester, &id)
    }
}

impl std::fmt::Debug for AuthorizationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
