//! Actor identity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated identity.
///
/// Anonymous callers are represented as `Option<Actor>::None` at every
/// kernel seam; this type is only ever an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The account identifier.
    pub id: Uuid,
    /// Whether the account holds the site-wide admin role.
    pub is_admin: bool,
    /// Groups the account belongs to.
    #[serde(default)]
    pub groups: BTreeSet<Uuid>,
}

impl Actor {
    /// Creates a non-admin actor with no group memberships.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            is_admin: false,
            groups: BTreeSet::new(),
        }
    }

    /// Creates an admin actor.
    #[must_use]
    pub fn admin(id: Uuid) -> Self {
        Self {
            id,
            is_admin: true,
            groups: BTreeSet::new(),
        }
    }

    /// Adds a group membership.
    #[must_use]
    pub fn with_group(mut self, group: Uuid) -> Self {
        self.groups.insert(group);
        self
    }

    /// Returns true if the actor is a member of the given group.
    #[must_use]
    pub fn is_member_of(&self, group: Uuid) -> bool {
        self.groups.contains(&group)
    }
}
