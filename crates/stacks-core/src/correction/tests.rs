//! Tests for the correction catalog and coordinator.

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::config::EngineConfig;
use crate::object::{Actor, Collection, Item};
use crate::store::{ActorStore, CollectionStore, ItemStore, MemoryStore, RelationshipStore};
use crate::workflow::WorkflowEngine;

fn catalog() -> CorrectionCatalog {
    CorrectionCatalog::from_config(&EngineConfig::default()).expect("default catalog builds")
}

fn installed_item() -> Item {
    let mut item = Item::workspace(Uuid::new_v4(), Uuid::new_v4());
    item.set_title("Test item");
    item.install();
    item
}

// =============================================================================
// Catalog Tests
// =============================================================================

#[test]
fn test_catalog_lookup() {
    let catalog = catalog();
    assert_eq!(catalog.all().len(), 2);
    assert_eq!(catalog.by_id("withdraw").unwrap().topic, "REQUEST/WITHDRAW");
    assert_eq!(
        catalog.by_topic("REQUEST/REINSTATE").unwrap().id,
        "reinstate"
    );
    assert!(catalog.by_id("nosuchtype").is_none());
    assert!(catalog.by_topic("REQUEST/NOSUCHTOPIC").is_none());
}

#[test]
fn test_withdrawn_item_gets_reinstate_only() {
    let catalog = catalog();
    let mut item = installed_item();
    item.withdraw();

    let applicable = catalog.applicable_for(&item, false);
    assert_eq!(applicable.len(), 1);
    assert_eq!(applicable[0].id, "reinstate");
}

#[test]
fn test_archived_item_gets_withdraw_only() {
    let catalog = catalog();
    let item = installed_item();

    let applicable = catalog.applicable_for(&item, false);
    assert_eq!(applicable.len(), 1);
    assert_eq!(applicable[0].id, "withdraw");
}

#[test]
fn test_discoverable_flag_does_not_change_withdraw_applicability() {
    let catalog = catalog();
    let mut item = installed_item();
    item.discoverable = false;

    let applicable = catalog.applicable_for(&item, false);
    assert_eq!(applicable.len(), 1);
    assert_eq!(applicable[0].id, "withdraw");
}

#[test]
fn test_workspace_item_gets_nothing() {
    let catalog = catalog();
    let item = Item::workspace(Uuid::new_v4(), Uuid::new_v4());
    assert!(catalog.applicable_for(&item, false).is_empty());
}

#[test]
fn test_open_correction_rules_types_out() {
    let catalog = catalog();
    let item = installed_item();
    assert!(catalog.applicable_for(&item, true).is_empty());
}

#[test]
fn test_custom_predicate_from_config() {
    let config = EngineConfig::from_toml(
        r#"
        [[correction.types]]
        id = "hide"
        topic = "REQUEST/HIDE"
        archived = true
        discoverable = true
        "#,
    )
    .unwrap();
    let catalog = CorrectionCatalog::from_config(&config).unwrap();

    let mut item = installed_item();
    assert_eq!(catalog.applicable_for(&item, false).len(), 1);

    item.discoverable = false;
    assert!(catalog.applicable_for(&item, false).is_empty());
}

// =============================================================================
// Coordinator Tests
// =============================================================================

struct Fixture {
    store: Arc<MemoryStore>,
    coordinator: CorrectionCoordinator,
    submitter: Actor,
    original_id: Uuid,
}

fn fixture(reviewer_group: Option<Uuid>) -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let mut collection = Collection::new(Uuid::new_v4(), "Articles");
    if let Some(group) = reviewer_group {
        collection = collection.with_reviewer_group(group);
    }
    let collection_id = collection.id;
    store.insert_collection(collection).unwrap();

    let submitter = Actor::new(Uuid::new_v4());
    store.insert_actor(submitter.clone()).unwrap();

    let mut original = Item::workspace(Uuid::new_v4(), collection_id);
    original.set_title("Test item");
    original.install();
    let original_id = original.id;
    store.insert_item(original).unwrap();

    let engine = Arc::new(WorkflowEngine::new(
        Arc::clone(&store) as Arc<dyn ItemStore>,
        Arc::clone(&store) as Arc<dyn CollectionStore>,
    ));
    let coordinator = CorrectionCoordinator::new(
        Arc::clone(&store) as Arc<dyn ItemStore>,
        Arc::clone(&store) as Arc<dyn CollectionStore>,
        Arc::clone(&store) as Arc<dyn RelationshipStore>,
        engine,
    );
    Fixture {
        store,
        coordinator,
        submitter,
        original_id,
    }
}

#[test]
fn test_open_correction_copies_metadata_and_links() {
    let fx = fixture(None);

    let correction = fx
        .coordinator
        .open_correction(fx.original_id, &fx.submitter)
        .unwrap();
    assert!(correction.is_workspace());
    assert_eq!(correction.title(), Some("Test item"));
    assert_ne!(correction.id, fx.original_id);

    let link = fx
        .coordinator
        .correction_link(correction.id)
        .unwrap()
        .expect("correction is linked");
    assert_eq!(link.left_item, correction.id);
    assert_eq!(link.right_item, fx.original_id);
    assert_eq!(link.leftward, CORRECTION_LEFTWARD);
    assert_eq!(link.rightward, CORRECTION_RIGHTWARD);
}

#[test]
fn test_correction_edits_do_not_touch_original() {
    let fx = fixture(None);
    let correction = fx
        .coordinator
        .open_correction(fx.original_id, &fx.submitter)
        .unwrap();

    let mut edited = fx.store.item(correction.id).unwrap();
    edited.set_title("Test item correction");
    fx.store.update_item(edited).unwrap();

    assert_eq!(
        fx.store.item(fx.original_id).unwrap().title(),
        Some("Test item")
    );
}

#[test]
fn test_second_open_correction_conflicts() {
    let fx = fixture(None);
    fx.coordinator
        .open_correction(fx.original_id, &fx.submitter)
        .unwrap();

    assert!(matches!(
        fx.coordinator.open_correction(fx.original_id, &fx.submitter),
        Err(CorrectionError::AlreadyInProgress { .. })
    ));
}

#[test]
fn test_workspace_original_is_not_correctable() {
    let fx = fixture(None);
    let workspace = Item::workspace(
        Uuid::new_v4(),
        fx.store.item(fx.original_id).unwrap().collection_id,
    );
    let workspace_id = workspace.id;
    fx.store.insert_item(workspace).unwrap();

    assert!(matches!(
        fx.coordinator.open_correction(workspace_id, &fx.submitter),
        Err(CorrectionError::NotCorrectable { .. })
    ));
}

#[test]
fn test_submit_unlinked_item_is_not_a_correction() {
    let fx = fixture(None);
    assert!(matches!(
        fx.coordinator.submit_correction(fx.original_id, &fx.submitter),
        Err(CorrectionError::NotACorrection { .. })
    ));
}
