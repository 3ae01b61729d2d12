//! Workflow state records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::object::Actor;

/// Lifecycle state of a workflow item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowState {
    /// Waiting for a reviewer to resolve it.
    UnderReview,
    /// A reviewer approved the submission.
    Approved,
    /// A reviewer rejected the submission.
    Rejected,
}

/// What the engine does to the item when a workflow item is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalEffect {
    /// Install the item into the archive.
    Install,
    /// Leave the item untouched; the submitting component applies its own
    /// effect (correction merges use this).
    Deferred,
}

/// An item moving through review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowItem {
    /// The workflow item identifier.
    pub id: Uuid,
    /// The item under review.
    pub item_id: Uuid,
    /// The collection the item was submitted into.
    pub collection_id: Uuid,
    /// The submitting actor.
    pub submitter: Uuid,
    /// Current lifecycle state.
    pub state: WorkflowState,
    /// What approval does to the item.
    pub approval_effect: ApprovalEffect,
    /// Reason recorded by a rejecting reviewer.
    pub rejection_reason: Option<String>,
}

/// The reviewers a pool task is visible to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecipients {
    /// Reviewer group; members are eligible claimants.
    pub group: Option<Uuid>,
    /// Individually named eligible claimants.
    #[serde(default)]
    pub users: Vec<Uuid>,
}

impl TaskRecipients {
    /// Recipients consisting of a single reviewer group.
    #[must_use]
    pub const fn group(group: Uuid) -> Self {
        Self {
            group: Some(group),
            users: Vec::new(),
        }
    }

    /// Returns true if the actor may claim a task addressed to these
    /// recipients. Admins are always eligible.
    #[must_use]
    pub fn is_eligible(&self, actor: &Actor) -> bool {
        if actor.is_admin {
            return true;
        }
        if self.group.is_some_and(|group| actor.is_member_of(group)) {
            return true;
        }
        self.users.contains(&actor.id)
    }
}

/// An unclaimed review task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTask {
    /// The task identifier.
    pub id: Uuid,
    /// The workflow item the task reviews.
    pub workflow_item_id: Uuid,
    /// Who may claim the task.
    pub recipients: TaskRecipients,
}

/// A review task exclusively owned by one reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedTask {
    /// The task identifier.
    pub id: Uuid,
    /// The workflow item the task reviews.
    pub workflow_item_id: Uuid,
    /// The pool task this claim originated from.
    pub pool_task_id: Uuid,
    /// The owning reviewer.
    pub claimant: Uuid,
    /// Recipients of the originating pool task, kept for return-to-pool.
    pub recipients: TaskRecipients,
}

/// An action a claimant performs on a claimed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Approve the submission.
    Approve,
    /// Reject the submission with a reason for the submitter.
    Reject {
        /// Why the submission was rejected.
        reason: String,
    },
    /// Release the claim back to the pool.
    ReturnToPool,
}

/// Outcome of submitting an item for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A reviewer group is configured; the item entered review.
    EnteredReview {
        /// The created workflow item.
        workflow_item_id: Uuid,
        /// The created pool task.
        pool_task_id: Uuid,
    },
    /// No reviewers are configured; the submission was approved
    /// immediately and no task records were created.
    AutoApproved {
        /// The submitted item.
        item_id: Uuid,
    },
}

/// How an action resolved a claimed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The submission was approved.
    Approved,
    /// The submission was rejected.
    Rejected,
    /// The claim was released back to the pool.
    ReturnedToPool {
        /// The freshly created pool task.
        pool_task_id: Uuid,
    },
}

/// Outcome of acting on a claimed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The workflow item the task reviewed.
    pub workflow_item_id: Uuid,
    /// The item under review.
    pub item_id: Uuid,
    /// How the task was resolved.
    pub disposition: Disposition,
}
