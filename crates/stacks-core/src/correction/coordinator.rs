// AGENT-AUTHORED
//! The correction coordinator.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::error::CorrectionError;
use crate::object::{Actor, Item};
use crate::store::{
    CollectionStore, ItemStore, Relationship, RelationshipStore, StoreError,
};
use crate::workflow::{
    Action, ActionOutcome, ApprovalEffect, SubmitOutcome, WorkflowEngine,
};

/// Relation label from the correction item towards its original.
pub const CORRECTION_LEFTWARD: &str = "isCorrectionOfItem";
/// Relation label from the original towards its correction item.
pub const CORRECTION_RIGHTWARD: &str = "isCorrectedByItem";

/// Outcome of submitting a correction item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionReview {
    /// No reviewers are configured: the edits were merged immediately and
    /// the correction item deleted, without any task records.
    AutoApplied {
        /// The corrected original.
        original_item_id: Uuid,
    },
    /// The correction entered the review workflow.
    EnteredReview {
        /// The created workflow item.
        workflow_item_id: Uuid,
        /// The created pool task.
        pool_task_id: Uuid,
    },
}

/// Outcome of an approved correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCorrection {
    /// The corrected original.
    pub original_item_id: Uuid,
    /// The workflow outcome of the approving action.
    pub outcome: ActionOutcome,
}

/// Creates, reviews, and applies metadata corrections.
///
/// A correction is a shadow workspace item holding proposed edits to an
/// installed original, linked by a typed relationship. Approval (and the
/// no-reviewer auto-apply path) merges the shadow's metadata onto the
/// original and deletes the shadow; rejection keeps the shadow addressable
/// and re-editable. The asymmetry is part of the observed contract.
pub struct CorrectionCoordinator {
    items: Arc<dyn ItemStore>,
    collections: Arc<dyn CollectionStore>,
    relationships: Arc<dyn RelationshipStore>,
    engine: Arc<WorkflowEngine>,
}

impl CorrectionCoordinator {
    /// Creates a coordinator over the given store seams and engine.
    #[must_use]
    pub fn new(
        items: Arc<dyn ItemStore>,
        collections: Arc<dyn CollectionStore>,
        relationships: Arc<dyn RelationshipStore>,
        engine: Arc<WorkflowEngine>,
    ) -> Self {
        Self {
            items,
            collections,
            relationships,
            engine,
        }
    }

    /// Returns the open correction link for an original item, if any.
    ///
    /// # Errors
    ///
    /// Returns store faults from the relationship lookup.
    pub fn open_correction_of(
        &self,
        original_item_id: Uuid,
    ) -> Result<Option<Relationship>, StoreError> {
        Ok(self
            .relationships
            .relationships_for_item(original_item_id)?
            .into_iter()
            .find(|rel| {
                rel.right_item == original_item_id && rel.leftward == CORRECTION_LEFTWARD
            }))
    }

    /// Returns the link making this item a correction, if any.
    ///
    /// # Errors
    ///
    /// Returns store faults from the relationship lookup.
    pub fn correction_link(
        &self,
        correction_item_id: Uuid,
    ) -> Result<Option<Relationship>, StoreError> {
        Ok(self
            .relationships
            .relationships_for_item(correction_item_id)?
            .into_iter()
            .find(|rel| {
                rel.left_item == correction_item_id && rel.leftward == CORRECTION_LEFTWARD
            }))
    }

    /// Opens a correction for an installed original item.
    ///
    /// The correction is a fresh workspace item in the original's
    /// collection, seeded with a copy of the original's metadata, and is
    /// independently editable without touching the original.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::NotCorrectable`] if the original is not
    /// installed, and [`CorrectionError::AlreadyInProgress`] if the
    /// original already has an open correction.
    pub fn open_correction(
        &self,
        original_item_id: Uuid,
        actor: &Actor,
    ) -> Result<Item, CorrectionError> {
        let original = self.items.item(original_item_id)?;
        if !original.archived {
            return Err(CorrectionError::NotCorrectable {
                item_id: original_item_id,
            });
        }
        if self.open_correction_of(original_item_id)?.is_some() {
            return Err(CorrectionError::AlreadyInProgress {
                item_id: original_item_id,
            });
        }

        let mut correction = Item::workspace(Uuid::new_v4(), original.collection_id)
            .with_submitter(actor.id);
        correction.metadata = original.metadata.clone();
        correction.discoverable = original.discoverable;
        self.items.insert_item(correction.clone())?;
        self.relationships.insert_relationship(Relationship::link(
            correction.id,
            original_item_id,
            CORRECTION_LEFTWARD,
            CORRECTION_RIGHTWARD,
        ))?;
        info!(
            original = %original_item_id,
            correction = %correction.id,
            "correction opened"
        );
        Ok(correction)
    }

    /// Submits a correction item for review.
    ///
    /// If the collection has no reviewer group the edits are merged
    /// immediately and no task records are ever created.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::NotACorrection`] if the item is not
    /// linked to an original, plus workflow and store faults.
    pub fn submit_correction(
        &self,
        correction_item_id: Uuid,
        actor: &Actor,
    ) -> Result<CorrectionReview, CorrectionError> {
        let link = self
            .correction_link(correction_item_id)?
            .ok_or(CorrectionError::NotACorrection {
                item_id: correction_item_id,
            })?;
        let correction = self.items.item(correction_item_id)?;
        let collection = self.collections.collection(correction.collection_id)?;

        if collection.reviewer_group.is_none() {
            let original_item_id = self.merge_and_close(&link)?;
            return Ok(CorrectionReview::AutoApplied { original_item_id });
        }

        match self
            .engine
            .submit(correction_item_id, actor.id, ApprovalEffect::Deferred)?
        {
            SubmitOutcome::EnteredReview {
                workflow_item_id,
                pool_task_id,
            } => Ok(CorrectionReview::EnteredReview {
                workflow_item_id,
                pool_task_id,
            }),
            // The engine only auto-approves when the collection has no
            // reviewer group, which was handled above; a concurrent config
            // change still merges correctly.
            SubmitOutcome::AutoApproved { .. } => {
                let original_item_id = self.merge_and_close(&link)?;
                Ok(CorrectionReview::AutoApplied { original_item_id })
            },
        }
    }

    /// Approves a claimed correction review task.
    ///
    /// The metadata merge runs as the action's atomic effect: the claimed
    /// task is consumed only if the merge commits, and the merge commits
    /// only under a valid claim.
    ///
    /// # Errors
    ///
    /// Returns workflow faults (unknown task, non-claimant actor) and
    /// store faults from the merge.
    pub fn approve(
        &self,
        task_id: Uuid,
        actor: &Actor,
    ) -> Result<AppliedCorrection, CorrectionError> {
        let (outcome, original_item_id) = self.engine.act_with(
            task_id,
            actor,
            Action::Approve,
            |workflow_item| {
                let link = self
                    .correction_link(workflow_item.item_id)?
                    .ok_or(CorrectionError::NotACorrection {
                        item_id: workflow_item.item_id,
                    })?;
                self.merge_and_close(&link)
            },
        )?;
        Ok(AppliedCorrection {
            original_item_id,
            outcome,
        })
    }

    /// Rejects a claimed correction review task.
    ///
    /// The original is untouched and the correction item, its
    /// relationship, and its workspace entry all remain addressable and
    /// re-editable for resubmission.
    ///
    /// # Errors
    ///
    /// Returns workflow faults (unknown task, non-claimant actor).
    pub fn reject(
        &self,
        task_id: Uuid,
        actor: &Actor,
        reason: impl Into<String>,
    ) -> Result<ActionOutcome, CorrectionError> {
        let outcome = self.engine.act(
            task_id,
            actor,
            Action::Reject {
                reason: reason.into(),
            },
        )?;
        Ok(outcome)
    }

    /// Merges the correction's metadata onto the original, then deletes
    /// the correction item and its relationship.
    ///
    /// Every field present on the correction replaces the original's
    /// values for that field; fields absent from the correction are left
    /// untouched. Reads and validation happen before the first write.
    fn merge_and_close(&self, link: &Relationship) -> Result<Uuid, CorrectionError> {
        let correction = self.items.item(link.left_item)?;
        let mut original = self.items.item(link.right_item)?;

        for (field, values) in correction.metadata {
            original.metadata.insert(field, values);
        }

        self.items.update_item(original)?;
        self.items.delete_item(link.left_item)?;
        self.relationships.delete_relationship(link.id)?;
        info!(
            original = %link.right_item,
            correction = %link.left_item,
            "correction merged and closed"
        );
        Ok(link.right_item)
    }
}

impl std::fmt::Debug for CorrectionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrectionCoordinator")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
