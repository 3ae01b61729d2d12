// AGENT-AUTHORED
//! In-memory store used by the kernel tests.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::error::StoreError;
use super::traits::{
    ActorStore, CollectionStore, ItemStore, ObjectDirectory, Relationship, RelationshipStore,
};
use crate::object::{Actor, Collection, Item, ObjectRef, ObjectType};

/// In-memory implementation of every store seam.
///
/// Each table is guarded by its own lock; individual operations are atomic
/// and the store is safe to share across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<Uuid, Item>>,
    collections: RwLock<HashMap<Uuid, Collection>>,
    actors: RwLock<HashMap<Uuid, Actor>>,
    relationships: RwLock<HashMap<Uuid, Relationship>>,
    objects: RwLock<HashSet<(ObjectType, Uuid)>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bare object so [`ObjectDirectory`] existence checks
    /// resolve it: sites, communities, bundles, bitstreams, and other
    /// types the kernel never mutates directly.
    pub fn register_object(&self, target: ObjectRef) {
        write(&self.objects).insert((target.object_type, target.id));
    }
}

impl ItemStore for MemoryStore {
    fn item(&self, id: Uuid) -> Result<Item, StoreError> {
        read(&self.items)
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: "item", id })
    }

    fn insert_item(&self, item: Item) -> Result<(), StoreError> {
        let mut items = write(&self.items);
        if items.contains_key(&item.id) {
            return Err(StoreError::AlreadyExists {
                kind: "item",
                id: item.id,
            });
        }
        items.insert(item.id, item);
        Ok(())
    }

    fn update_item(&self, item: Item) -> Result<(), StoreError> {
        let mut items = write(&self.items);
        if !items.contains_key(&item.id) {
            return Err(StoreError::NotFound {
                kind: "item",
                id: item.id,
            });
        }
        items.insert(item.id, item);
        Ok(())
    }

    fn delete_item(&self, id: Uuid) -> Result<(), StoreError> {
        write(&self.items)
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { kind: "item", id })
    }
}

impl CollectionStore for MemoryStore {
    fn collection(&self, id: Uuid) -> Result<Collection, StoreError> {
        read(&self.collections)
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: "collection",
                id,
            })
    }

    fn insert_collection(&self, collection: Collection) -> Result<(), StoreError> {
        let mut collections = write(&self.collections);
        if collections.contains_key(&collection.id) {
            return Err(StoreError::AlreadyExists {
                kind: "collection",
                id: collection.id,
            });
        }
        collections.insert(collection.id, collection);
        Ok(())
    }
}

impl ActorStore for MemoryStore {
    fn actor(&self, id: Uuid) -> Result<Actor, StoreError> {
        read(&self.actors)
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: "actor", id })
    }

    fn insert_actor(&self, actor: Actor) -> Result<(), StoreError> {
        let mut actors = write(&self.actors);
        if actors.contains_key(&actor.id) {
            return Err(StoreError::AlreadyExists {
                kind: "actor",
                id: actor.id,
            });
        }
        actors.insert(actor.id, actor);
        Ok(())
    }
}

impl RelationshipStore for MemoryStore {
    fn insert_relationship(&self, relationship: Relationship) -> Result<(), StoreError> {
        let mut relationships = write(&self.relationships);
        if relationships.contains_key(&relationship.id) {
            return Err(StoreError::AlreadyExists {
                kind: "relationship",
                id: relationship.id,
            });
        }
        relationships.insert(relationship.id, relationship);
        Ok(())
    }

    fn relationships_for_item(&self, item: Uuid) -> Result<Vec<Relationship>, StoreError> {
        let mut found: Vec<Relationship> = read(&self.relationships)
            .values()
            .filter(|rel| rel.left_item == item || rel.right_item == item)
            .cloned()
            .collect();
        // Deterministic order for callers that inspect the first match.
        found.sort_by_key(|rel| rel.id);
        Ok(found)
    }

    fn delete_relationship(&self, id: Uuid) -> Result<(), StoreError> {
        write(&self.relationships)
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                kind: "relationship",
                id,
            })
    }
}

impl ObjectDirectory for MemoryStore {
    fn object_exists(&self, target: &ObjectRef) -> Result<bool, StoreError> {
        let exists = match target.object_type {
            ObjectType::Item => read(&self.items).contains_key(&target.id),
            ObjectType::Collection => read(&self.collections).contains_key(&target.id),
            ObjectType::EPerson => read(&self.actors).contains_key(&target.id),
            _ => read(&self.objects).contains(&(target.object_type, target.id)),
        };
        Ok(exists)
    }
}
