// AGENT-AUTHORED
//! The workflow task engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};
use uuid::Uuid;

use super::error::WorkflowError;
use super::state::{
    Action, ActionOutcome, ApprovalEffect, ClaimedTask, Disposition, PoolTask, SubmitOutcome,
    TaskRecipients, WorkflowItem, WorkflowState,
};
use crate::object::Actor;
use crate::store::{CollectionStore, ItemStore};

/// All mutable task state, guarded by a single lock.
#[derive(Debug, Default)]
struct TaskState {
    workflow_items: HashMap<Uuid, WorkflowItem>,
    pool: HashMap<Uuid, PoolTask>,
    claimed: HashMap<Uuid, ClaimedTask>,
}

/// The pool-task / claimed-task review state machine.
///
/// The workflow item's state and its task records are the only mutable
/// shared resource in the kernel; every transition runs under one lock, so
/// claiming is first-wins and an action either commits completely or
/// leaves no trace.
pub struct WorkflowEngine {
    items: Arc<dyn ItemStore>,
    collections: Arc<dyn CollectionStore>,
    state: Mutex<TaskState>,
}

fn lock(state: &Mutex<TaskState>) -> MutexGuard<'_, TaskState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl WorkflowEngine {
    /// Creates an engine over the given store seams.
    #[must_use]
    pub fn new(items: Arc<dyn ItemStore>, collections: Arc<dyn CollectionStore>) -> Self {
        Self {
            items,
            collections,
            state: Mutex::new(TaskState::default()),
        }
    }

    /// Submits a workspace item for review.
    ///
    /// A collection with a reviewer group yields a workflow item and a
    /// pool task addressed to the group. A collection without one
    /// auto-approves: with [`ApprovalEffect::Install`] the item is
    /// installed immediately, with [`ApprovalEffect::Deferred`] the caller
    /// applies its own effect; either way no task records are created.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotSubmittable`] for non-workspace items,
    /// [`WorkflowError::AlreadyUnderReview`] for double submission, and
    /// store faults.
    pub fn submit(
        &self,
        item_id: Uuid,
        submitter: Uuid,
        effect: ApprovalEffect,
    ) -> Result<SubmitOutcome, WorkflowError> {
        let item = self.items.item(item_id)?;
        if !item.is_workspace() {
            return Err(WorkflowError::NotSubmittable { item_id });
        }
        let collection = self.collections.collection(item.collection_id)?;

        let Some(reviewer_group) = collection.reviewer_group else {
            if effect == ApprovalEffect::Install {
                let mut installed = item;
                installed.install();
                self.items.update_item(installed)?;
            }
            info!(item = %item_id, collection = %collection.id, "no reviewers configured, submission auto-approved");
            return Ok(SubmitOutcome::AutoApproved { item_id });
        };

        let mut state = lock(&self.state);
        let under_review = state
            .workflow_items
            .values()
            .any(|wfi| wfi.item_id == item_id && wfi.state == WorkflowState::UnderReview);
        if under_review {
            return Err(WorkflowError::AlreadyUnderReview { item_id });
        }

        let workflow_item = WorkflowItem {
            id: Uuid::new_v4(),
            item_id,
            collection_id: collection.id,
            submitter,
            state: WorkflowState::UnderReview,
            approval_effect: effect,
            rejection_reason: None,
        };
        let task = PoolTask {
            id: Uuid::new_v4(),
            workflow_item_id: workflow_item.id,
            recipients: TaskRecipients::group(reviewer_group),
        };
        let outcome = SubmitOutcome::EnteredReview {
            workflow_item_id: workflow_item.id,
            pool_task_id: task.id,
        };
        info!(
            item = %item_id,
            workflow_item = %workflow_item.id,
            pool_task = %task.id,
            "submission entered review"
        );
        state.workflow_items.insert(workflow_item.id, workflow_item);
        state.pool.insert(task.id, task);
        Ok(outcome)
    }

    /// Claims a pool task for the acting reviewer.
    ///
    /// First successful claim wins; the losing claim fails without side
    /// effect and the single claimed task keeps its original owner.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::AlreadyClaimed`] if another actor claimed
    /// the task first, [`WorkflowError::NotEligible`] if the actor is not
    /// among the recipients, and [`WorkflowError::TaskNotFound`] if the
    /// task never existed.
    pub fn claim(&self, task_id: Uuid, actor: &Actor) -> Result<ClaimedTask, WorkflowError> {
        let mut state = lock(&self.state);

        if !state.pool.contains_key(&task_id) {
            // Distinguish a lost race from a dangling reference.
            if let Some(holder) = state.claimed.values().find(|c| c.pool_task_id == task_id) {
                return Err(WorkflowError::AlreadyClaimed {
                    task_id,
                    claimant: holder.claimant,
                });
            }
            return Err(WorkflowError::TaskNotFound { task_id });
        }
        if !state.pool[&task_id].recipients.is_eligible(actor) {
            return Err(WorkflowError::NotEligible {
                task_id,
                actor: actor.id,
            });
        }

        // Eligible and unclaimed: swap the pool task for a claimed one.
        let pool_task = state
            .pool
            .remove(&task_id)
            .ok_or(WorkflowError::TaskNotFound { task_id })?;
        let claimed = ClaimedTask {
            id: Uuid::new_v4(),
            workflow_item_id: pool_task.workflow_item_id,
            pool_task_id: pool_task.id,
            claimant: actor.id,
            recipients: pool_task.recipients,
        };
        debug!(task = %task_id, claimant = %actor.id, "pool task claimed");
        state.claimed.insert(claimed.id, claimed.clone());
        Ok(claimed)
    }

    /// Performs an action on a claimed task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotClaimant`] if the actor does not hold
    /// the claim, [`WorkflowError::TaskNotFound`] if no such claimed task
    /// exists, and store faults from installing the item.
    pub fn act(
        &self,
        task_id: Uuid,
        actor: &Actor,
        action: Action,
    ) -> Result<ActionOutcome, WorkflowError> {
        self.act_with(task_id, actor, action, |_| Ok::<(), WorkflowError>(()))
            .map(|(outcome, ())| outcome)
    }

    /// Performs an action with a caller-supplied effect that must commit
    /// atomically with the task-state transition.
    ///
    /// The effect runs under the engine lock after claimant validation and
    /// before any task state changes: if it fails, the task remains
    /// claimed and untouched; if it succeeds, the transition commits. The
    /// correction coordinator threads its metadata merge through here so a
    /// correction item is never consumed without its edits being applied.
    ///
    /// # Errors
    ///
    /// The errors of [`Self::act`], plus whatever the effect returns.
    pub fn act_with<T, E>(
        &self,
        task_id: Uuid,
        actor: &Actor,
        action: Action,
        effect: impl FnOnce(&WorkflowItem) -> Result<T, E>,
    ) -> Result<(ActionOutcome, T), E>
    where
        E: From<WorkflowError>,
    {
        let mut state = lock(&self.state);

        let claimed = state
            .claimed
            .get(&task_id)
            .ok_or(WorkflowError::TaskNotFound { task_id })?
            .clone();
        if claimed.claimant != actor.id {
            return Err(WorkflowError::NotClaimant {
                task_id,
                actor: actor.id,
            }
            .into());
        }
        let workflow_item = state
            .workflow_items
            .get(&claimed.workflow_item_id)
            .ok_or(WorkflowError::WorkflowItemNotFound {
                workflow_item_id: claimed.workflow_item_id,
            })?
            .clone();

        // For an installing approval, validate the item up front so the
        // whole action can still fail without side effect.
        let install_target = match (&action, workflow_item.approval_effect) {
            (Action::Approve, ApprovalEffect::Install) => {
                Some(self.items.item(workflow_item.item_id).map_err(WorkflowError::from)?)
            },
            _ => None,
        };

        let effect_result = effect(&workflow_item)?;

        if let Some(mut item) = install_target {
            item.install();
            self.items.update_item(item).map_err(WorkflowError::from)?;
        }

        let disposition = match action {
            Action::Approve => {
                state.claimed.remove(&task_id);
                if let Some(wfi) = state.workflow_items.get_mut(&workflow_item.id) {
                    wfi.state = WorkflowState::Approved;
                }
                info!(task = %task_id, workflow_item = %workflow_item.id, "submission approved");
                Disposition::Approved
            },
            Action::Reject { reason } => {
                state.claimed.remove(&task_id);
                if let Some(wfi) = state.workflow_items.get_mut(&workflow_item.id) {
                    wfi.state = WorkflowState::Rejected;
                    wfi.rejection_reason = Some(reason.clone());
                }
                info!(
                    task = %task_id,
                    workflow_item = %workflow_item.id,
                    reason = %reason,
                    "submission rejected, item returned to submitter"
                );
                Disposition::Rejected
            },
            Action::ReturnToPool => {
                state.claimed.remove(&task_id);
                let task = PoolTask {
                    id: Uuid::new_v4(),
                    workflow_item_id: workflow_item.id,
                    recipients: claimed.recipients,
                };
                let pool_task_id = task.id;
                state.pool.insert(task.id, task);
                debug!(task = %task_id, pool_task = %pool_task_id, "claim returned to pool");
                Disposition::ReturnedToPool { pool_task_id }
            },
        };

        Ok((
            ActionOutcome {
                workflow_item_id: workflow_item.id,
                item_id: workflow_item.item_id,
                disposition,
            },
            effect_result,
        ))
    }

    /// Returns a snapshot of a workflow item.
    #[must_use]
    pub fn workflow_item(&self, id: Uuid) -> Option<WorkflowItem> {
        lock(&self.state).workflow_items.get(&id).cloned()
    }

    /// Returns the workflow item currently tracking the given item, if
    /// any.
    #[must_use]
    pub fn workflow_item_for_item(&self, item_id: Uuid) -> Option<WorkflowItem> {
        lock(&self.state)
            .workflow_items
            .values()
            .find(|wfi| wfi.item_id == item_id)
            .cloned()
    }

    /// Returns a snapshot of all pool tasks.
    #[must_use]
    pub fn pool_tasks(&self) -> Vec<PoolTask> {
        lock(&self.state).pool.values().cloned().collect()
    }

    /// Returns the pool tasks the actor is eligible to claim.
    #[must_use]
    pub fn pool_tasks_for(&self, actor: &Actor) -> Vec<PoolTask> {
        lock(&self.state)
            .pool
            .values()
            .filter(|task| task.recipients.is_eligible(actor))
            .cloned()
            .collect()
    }

    /// Returns a snapshot of all claimed tasks.
    #[must_use]
    pub fn claimed_tasks(&self) -> Vec<ClaimedTask> {
        lock(&self.state).claimed.values().cloned().collect()
    }

    /// Returns a snapshot of a claimed task.
    #[must_use]
    pub fn claimed_task(&self, id: Uuid) -> Option<ClaimedTask> {
        lock(&self.state).claimed.get(&id).cloned()
    }
}

impl std::fmt::Debug for WorkflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("WorkflowEngine")
            .field("workflow_items", &state.workflow_items.len())
            .field("pool", &state.pool.len())
            .field("claimed", &state.claimed.len())
            .finish()
    }
}
