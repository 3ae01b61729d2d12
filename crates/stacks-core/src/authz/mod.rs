//! Authorization feature registry and grant resolution.
//!
//! A *feature* is a named, stateless predicate over an `(actor, target)`
//! pair, such as "can change this password" or "true for admins".
//! Features are registered once at startup from explicit configuration
//! and never mutated afterwards. The resolver turns a feature lookup into
//! a total
//! [`Decision`], and composite grant identifiers make individual grants
//! addressable by the boundary.
//!
//! # Architecture
//!
//! ```text
//! EngineConfig --> FeatureRegistry (immutable after startup)
//!                        |
//! (actor?, feature, target) --> AuthorizationResolver --> Decision
//!                        |
//! GrantId <-> canonical string  (strict parse / canonical serialize)
//! ```
//!
//! # Key Concepts
//!
//! - **Decision totality**: every `(actor, feature, target)` triple yields
//!   exactly one [`Decision`]; evaluator faults are captured and surface as
//!   [`Decision::EvaluationError`], never as an unhandled fault
//! - **Grant**: the derived, non-persistent fact that a feature holds for
//!   an `(actor, target)` pair; existence is computed on demand
//! - **Viewing order**: resolvability (does the referenced actor, target,
//!   and feature exist) is checked before entitlement (may the requester
//!   see this grant), which is checked before the feature's own decision

mod decision;
mod error;
mod feature;
mod grant;
mod registry;
mod resolver;


pub use decision::Decision;
pub use error::AuthzError;
pub use feature::{
    builtin_features, AlwaysFalse, AlwaysRaise, AlwaysTrue, CanChangePassword, EvalContext,
    EvalFault, Feature, TrueForAdmins, TrueForLoggedUsers,
};
pub use grant::{Grant, GrantId, GrantIdParseError};
pub use registry::{FeatureRegistry, RegistryError};
pub use resolver::AuthorizationResolver;
