//! Store seam traits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;
use crate::object::{Actor, Collection, Item, ObjectRef};

/// Read/write seam over the item table.
///
/// Implementations return owned snapshots; the kernel never holds a
/// reference into store internals across an operation.
pub trait ItemStore: Send + Sync {
    /// Fetches an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the item does not exist.
    fn item(&self, id: Uuid) -> Result<Item, StoreError>;

    /// Inserts a new item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] on id collision.
    fn insert_item(&self, item: Item) -> Result<(), StoreError>;

    /// Replaces an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the item does not exist.
    fn update_item(&self, item: Item) -> Result<(), StoreError>;

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the item does not exist.
    fn delete_item(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Read seam over the collection table.
pub trait CollectionStore: Send + Sync {
    /// Fetches a collection by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the collection does not exist.
    fn collection(&self, id: Uuid) -> Result<Collection, StoreError>;

    /// Inserts a new collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] on id collision.
    fn insert_collection(&self, collection: Collection) -> Result<(), StoreError>;
}

/// Read seam over the account table.
pub trait ActorStore: Send + Sync {
    /// Fetches an actor by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the account does not exist.
    fn actor(&self, id: Uuid) -> Result<Actor, StoreError>;

    /// Inserts a new actor.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] on id collision.
    fn insert_actor(&self, actor: Actor) -> Result<(), StoreError>;
}

/// A typed link between two items.
///
/// The leftward label names the relation as seen from the left item, the
/// rightward label as seen from the right item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// The relationship identifier.
    pub id: Uuid,
    /// The left item.
    pub left_item: Uuid,
    /// The right item.
    pub right_item: Uuid,
    /// Relation label as seen from the left item.
    pub leftward: String,
    /// Relation label as seen from the right item.
    pub rightward: String,
}

impl Relationship {
    /// Creates a relationship with a fresh identifier.
    #[must_use]
    pub fn link(
        left_item: Uuid,
        right_item: Uuid,
        leftward: impl Into<String>,
        rightward: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            left_item,
            right_item,
            leftward: leftward.into(),
            rightward: rightward.into(),
        }
    }
}

/// Read/write seam over typed item relationships.
pub trait RelationshipStore: Send + Sync {
    /// Inserts a new relationship.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] on id collision.
    fn insert_relationship(&self, relationship: Relationship) -> Result<(), StoreError>;

    /// Returns all relationships touching the given item, on either side.
    ///
    /// # Errors
    ///
    /// Returns a store fault if the lookup fails.
    fn relationships_for_item(&self, item: Uuid) -> Result<Vec<Relationship>, StoreError>;

    /// Deletes a relationship.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the relationship does not exist.
    fn delete_relationship(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Existence checks for arbitrary typed object references.
///
/// Grant resolution must distinguish a well-formed reference to a missing
/// object from a resolvable one, for every object type the boundary can
/// name, including types the kernel itself never mutates.
pub trait ObjectDirectory: Send + Sync {
    /// Returns true if the referenced object exists.
    ///
    /// # Errors
    ///
    /// Returns a store fault if the lookup fails.
    fn object_exists(&self, target: &ObjectRef) -> Result<bool, StoreError>;
}
