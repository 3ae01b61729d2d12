//! Domain object model for the repository kernel.
//!
//! This module defines the addressable objects the kernel reasons about:
//! typed object references, actors (with anonymous represented as
//! `Option<Actor>::None` at every seam), items with their state flags, and
//! collections with their review configuration.
//!
//! # Key Concepts
//!
//! - **`ObjectRef`**: a `(type, uuid)` pair addressing any domain object
//! - **`Actor`**: an authenticated identity with admin flag and groups
//! - **`Item`**: the archival unit; `archived = false` means the item is
//!   still an editable workspace item
//! - **`MetadataField`**: a `schema.element[.qualifier]` key

mod actor;
mod error;
mod item;
mod types;

pub use actor::Actor;
pub use error::ObjectError;
pub use item::{Collection, Item, MetadataField};
pub use types::{ObjectRef, ObjectType};
