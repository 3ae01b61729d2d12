//! End-to-end correction scenarios: open a correction against an
//! installed item, route it through review, and verify the merge/keep
//! behavior for each verdict.

use std::sync::Arc;

use stacks_core::correction::{CorrectionCoordinator, CorrectionReview};
use stacks_core::object::{Actor, Collection, Item};
use stacks_core::store::{
    ActorStore, CollectionStore, ItemStore, MemoryStore, RelationshipStore, StoreError,
};
use stacks_core::workflow::WorkflowEngine;
use uuid::Uuid;

struct Harness {
    store: Arc<MemoryStore>,
    engine: Arc<WorkflowEngine>,
    coordinator: CorrectionCoordinator,
    submitter: Actor,
    reviewer: Actor,
    original_id: Uuid,
}

fn harness(with_reviewers: bool) -> Harness {
    let store = Arc::new(MemoryStore::new());

    let reviewer_group = Uuid::new_v4();
    let mut collection = Collection::new(Uuid::new_v4(), "Articles");
    if with_reviewers {
        collection = collection.with_reviewer_group(reviewer_group);
    }
    let collection_id = collection.id;
    store.insert_collection(collection).unwrap();

    let submitter = Actor::new(Uuid::new_v4());
    let reviewer = Actor::new(Uuid::new_v4()).with_group(reviewer_group);
    store.insert_actor(submitter.clone()).unwrap();
    store.insert_actor(reviewer.clone()).unwrap();

    let mut original = Item::workspace(Uuid::new_v4(), collection_id).with_submitter(submitter.id);
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
        Arc::clone(&engine),
    );

    Harness {
        store,
        engine,
        coordinator,
        submitter,
        reviewer,
        original_id,
    }
}

impl Harness {
    /// Opens a correction, retitles it, and returns its id.
    fn edited_correction(&self) -> Uuid {
        let correction = self
            .coordinator
            .open_correction(self.original_id, &self.submitter)
            .unwrap();
        let mut edited = self.store.item(correction.id).unwrap();
        edited.set_title("Test item correction");
        self.store.update_item(edited).unwrap();
        correction.id
    }

    fn submit_into_review(&self, correction_id: Uuid) -> Uuid {
        match self
            .coordinator
            .submit_correction(correction_id, &self.submitter)
            .unwrap()
        {
            CorrectionReview::EnteredReview { pool_task_id, .. } => pool_task_id,
            CorrectionReview::AutoApplied { .. } => panic!("expected a review step"),
        }
    }

    fn original_title(&self) -> String {
        self.store
            .item(self.original_id)
            .unwrap()
            .title()
            .unwrap()
            .to_string()
    }
}

#[test]
fn approved_correction_merges_and_deletes_the_shadow() {
    let h = harness(true);
    let correction_id = h.edited_correction();
    let pool_task_id = h.submit_into_review(correction_id);

    let claimed = h.engine.claim(pool_task_id, &h.reviewer).unwrap();
    let applied = h.coordinator.approve(claimed.id, &h.reviewer).unwrap();
    assert_eq!(applied.original_item_id, h.original_id);

    // The edit landed on the original.
    assert_eq!(h.original_title(), "Test item correction");

    // The correction item no longer resolves and its link is gone.
    assert!(matches!(
        h.store.item(correction_id),
        Err(StoreError::NotFound { .. })
    ));
    assert!(h
        .coordinator
        .open_correction_of(h.original_id)
        .unwrap()
        .is_none());

    // No task records remain.
    assert!(h.engine.pool_tasks().is_empty());
    assert!(h.engine.claimed_tasks().is_empty());
}

#[test]
fn rejected_correction_keeps_the_shadow_and_the_original() {
    let h = harness(true);
    let correction_id = h.edited_correction();
    let pool_task_id = h.submit_into_review(correction_id);

    let claimed = h.engine.claim(pool_task_id, &h.reviewer).unwrap();
    h.coordinator
        .reject(claimed.id, &h.reviewer, "title is wrong")
        .unwrap();

    // The original is untouched.
    assert_eq!(h.original_title(), "Test item");

    // The correction item still resolves, still linked, still editable.
    let correction = h.store.item(correction_id).unwrap();
    assert_eq!(correction.title(), Some("Test item correction"));
    assert!(correction.is_workspace());
    assert!(h
        .coordinator
        .correction_link(correction_id)
        .unwrap()
        .is_some());

    let mut re_edited = correction;
    re_edited.set_title("Test item correction, second try");
    h.store.update_item(re_edited).unwrap();
}

#[test]
fn rejected_correction_can_be_resubmitted_and_approved() {
    let h = harness(true);
    let correction_id = h.edited_correction();
    let pool_task_id = h.submit_into_review(correction_id);
    let claimed = h.engine.claim(pool_task_id, &h.reviewer).unwrap();
    h.coordinator
        .reject(claimed.id, &h.reviewer, "not yet")
        .unwrap();

    // Resubmission creates a fresh review round for the same shadow item.
    let second_round = h.submit_into_review(correction_id);
    let reclaimed = h.engine.claim(second_round, &h.reviewer).unwrap();
    h.coordinator.approve(reclaimed.id, &h.reviewer).unwrap();

    assert_eq!(h.original_title(), "Test item correction");
    assert!(h.store.item(correction_id).is_err());
}

#[test]
fn no_reviewers_auto_applies_without_any_tasks() {
    let h = harness(false);
    let correction_id = h.edited_correction();

    let outcome = h
        .coordinator
        .submit_correction(correction_id, &h.submitter)
        .unwrap();
    assert_eq!(
        outcome,
        CorrectionReview::AutoApplied {
            original_item_id: h.original_id
        }
    );

    // Merged immediately, shadow deleted, and no task records were ever
    // created.
    assert_eq!(h.original_title(), "Test item correction");
    assert!(h.store.item(correction_id).is_err());
    assert!(h.engine.pool_tasks().is_empty());
    assert!(h.engine.claimed_tasks().is_empty());
}

#[test]
fn approval_by_non_claimant_leaves_everything_untouched() {
    let h = harness(true);
    let correction_id = h.edited_correction();
    let pool_task_id = h.submit_into_review(correction_id);
    let claimed = h.engine.claim(pool_task_id, &h.reviewer).unwrap();

    let impostor = Actor::new(Uuid::new_v4());
    assert!(h.coordinator.approve(claimed.id, &impostor).is_err());

    // The merge did not run and the claim survives.
    assert_eq!(h.original_title(), "Test item");
    assert!(h.store.item(correction_id).is_ok());
    assert_eq!(h.engine.claimed_tasks().len(), 1);
}
