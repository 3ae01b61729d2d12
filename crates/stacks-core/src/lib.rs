//! Review-workflow and authorization kernel for the stacks digital
//! repository.
//!
//! This crate is the engine behind the repository's submission review and
//! capability resolution surfaces. The surrounding web layer (routing,
//! serialization, sessions) and the persistence layer (entity CRUD) are
//! external collaborators reached through the seams in [`store`].
//!
//! # Architecture
//!
//! ```text
//! EngineConfig ----> FeatureRegistry ----> AuthorizationResolver
//!        |                                        |
//!        `--> CorrectionCatalog          Decision / Grant views
//!
//! submit --> WorkflowEngine (pool task -> claimed task -> action)
//!                 ^
//! CorrectionCoordinator (shadow item <-> original, merge on approve)
//! ```
//!
//! # Key Concepts
//!
//! - **Feature**: a named, stateless predicate deciding whether an actor
//!   may do or see something regarding a target; registered once at
//!   startup from explicit configuration
//! - **Decision**: the total outcome of evaluating a feature (granted,
//!   denied, not applicable, or a captured evaluation error)
//! - **Pool/claimed tasks**: the review state machine; claims are atomic
//!   and first-wins, actions are claimant-only
//! - **Correction item**: a transient shadow item carrying proposed edits
//!   to an installed original; merged and deleted on approval, kept for
//!   resubmission on rejection
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use stacks_core::authz::{AuthorizationResolver, Decision, FeatureRegistry};
//! use stacks_core::config::EngineConfig;
//! use stacks_core::object::{Actor, ObjectRef};
//! use stacks_core::store::{ActorStore, ItemStore, MemoryStore, ObjectDirectory};
//! use uuid::Uuid;
//!
//! let config = EngineConfig::default();
//! let registry = Arc::new(FeatureRegistry::from_config(&config).expect("valid config"));
//! let store = Arc::new(MemoryStore::new());
//!
//! let site = ObjectRef::site(Uuid::new_v4());
//! store.register_object(site);
//!
//! let resolver = AuthorizationResolver::new(
//!     registry,
//!     Arc::clone(&store) as Arc<dyn ObjectDirectory>,
//!     Arc::clone(&store) as Arc<dyn ActorStore>,
//!     Arc::clone(&store) as Arc<dyn ItemStore>,
//! );
//! let admin = Actor::admin(Uuid::new_v4());
//! assert_eq!(
//!     resolver.resolve(Some(&admin), "trueforadmins", &site),
//!     Decision::Granted
//! );
//! ```

pub mod authz;
pub mod config;
pub mod correction;
pub mod fault;
pub mod object;
pub mod store;
pub mod workflow;
