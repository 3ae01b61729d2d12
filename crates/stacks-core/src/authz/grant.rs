// AGENT-AUTHORED
//! Composite grant identifiers.
//!
//! A grant is addressed by the canonical string
//! `[actorUuid_]feature_typeLabel_objectUuid`, with the actor segment
//! omitted entirely for anonymous grants. The identifier is an explicit
//! struct with one documented serialization and a strict parser; partial
//! or ambiguous input is rejected, never guessed at.
//!
//! Parse failures classify as [`FaultClass::MalformedRequest`] internally;
//! the repository boundary renders them as not-found, the same way it
//! renders a well-formed reference to a grant that does not hold.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::fault::FaultClass;
use crate::object::{ObjectRef, ObjectType};

/// Number of segments in an anonymous grant identifier.
const SEGMENTS_ANONYMOUS: usize = 3;
/// Number of segments in an actor-scoped grant identifier.
const SEGMENTS_WITH_ACTOR: usize = 4;

/// Errors raised by the strict grant-identifier parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GrantIdParseError {
    /// The identifier was empty.
    #[error("empty grant identifier")]
    Empty,

    /// The identifier did not have 3 or 4 segments.
    #[error("grant identifier must have {SEGMENTS_ANONYMOUS} or {SEGMENTS_WITH_ACTOR} segments, found {found}")]
    SegmentCount {
        /// The number of segments found.
        found: usize,
    },

    /// The actor segment was present but not a UUID.
    #[error("actor segment is not a UUID: {segment:?}")]
    InvalidActorSegment {
        /// The rejected segment.
        segment: String,
    },

    /// The feature segment was empty.
    #[error("feature segment is empty")]
    EmptyFeatureSegment,

    /// The target type segment was not a known label.
    #[error("unknown target type label: {label:?}")]
    UnknownTypeLabel {
        /// The rejected label.
        label: String,
    },

    /// The object segment was not a UUID.
    #[error("object segment is not a UUID: {segment:?}")]
    InvalidObjectSegment {
        /// The rejected segment.
        segment: String,
    },
}

impl GrantIdParseError {
    /// Returns the status class for this error.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        FaultClass::MalformedRequest
    }
}

/// The identity of a single grant: `(actor?, feature, target)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrantId {
    /// The grant's actor; `None` for anonymous grants.
    pub actor: Option<Uuid>,
    /// The feature name.
    pub feature: String,
    /// The target's type tag.
    pub object_type: ObjectType,
    /// The target's identifier.
    pub object: Uuid,
}

impl GrantId {
    /// Creates a grant identifier.
    #[must_use]
    pub fn new(actor: Option<Uuid>, feature: impl Into<String>, target: ObjectRef) -> Self {
        Self {
            actor,
            feature: feature.into(),
            object_type: target.object_type,
            object: target.id,
        }
    }

    /// Returns the target as a typed object reference.
    #[must_use]
    pub const fn target(&self) -> ObjectRef {
        ObjectRef::new(self.object_type, self.object)
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Parses the canonical string form.
    ///
    /// # Errors
    ///
    /// Returns a [`GrantIdParseError`] describing the first malformed
    /// segment. A well-formed identifier naming entities that do not exist
    /// parses successfully; existence is the resolver's concern.
    pub fn parse(input: &str) -> Result<Self, GrantIdParseError> {
        if input.is_empty() {
            return Err(GrantIdParseError::Empty);
        }
        let segments: Vec<&str> = input.split('_').collect();
        let (actor_segment, rest) = match segments.len() {
            SEGMENTS_ANONYMOUS => (None, &segments[..]),
            SEGMENTS_WITH_ACTOR => (Some(segments[0]), &segments[1..]),
            found => return Err(GrantIdParseError::SegmentCount { found }),
        };

        let actor = actor_segment
            .map(|segment| {
                Uuid::parse_str(segment).map_err(|_| GrantIdParseError::InvalidActorSegment {
                    segment: segment.to_string(),
                })
            })
            .transpose()?;

        let feature = rest[0];
        if feature.is_empty() {
            return Err(GrantIdParseError::EmptyFeatureSegment);
        }

        let object_type: ObjectType =
            rest[1]
                .parse()
                .map_err(|_| GrantIdParseError::UnknownTypeLabel {
                    label: rest[1].to_string(),
                })?;

        let object =
            Uuid::parse_str(rest[2]).map_err(|_| GrantIdParseError::InvalidObjectSegment {
                segment: rest[2].to_string(),
            })?;

        Ok(Self {
            actor,
            feature: feature.to_string(),
            object_type,
            object,
        })
    }
}

impl std::fmt::Display for GrantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(actor) = self.actor {
            write!(f, "{actor}_")?;
        }
        write!(f, "{}_{}_{}", self.feature, self.object_type, self.object)
    }
}

impl std::str::FromStr for GrantId {
    type Err = GrantIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A resolved grant: proof that the identified feature holds.
///
/// Grants are derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// The grant's identity.
    pub id: GrantId,
}

impl Grant {
    /// Returns the canonical string identifier.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.id.canonical()
    }
}
