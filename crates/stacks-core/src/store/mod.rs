//! Collaborator store seams.
//!
//! The surrounding web/ORM layer owns persistence; the kernel only needs
//! narrow read/write seams over it. Each seam is a trait, and
//! [`MemoryStore`] provides the in-memory implementation the kernel tests
//! run against.
//!
//! # Key Concepts
//!
//! - **`ItemStore` / `CollectionStore` / `ActorStore`**: CRUD over the
//!   entity tables the kernel reads and writes
//! - **`RelationshipStore`**: typed left/right item links with
//!   leftward/rightward labels
//! - **`ObjectDirectory`**: existence checks for arbitrary typed object
//!   references (grant resolution needs these for every object type, not
//!   just the ones the kernel mutates)

mod error;
mod memory;
mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::{
    ActorStore, CollectionStore, ItemStore, ObjectDirectory, Relationship, RelationshipStore,
};
