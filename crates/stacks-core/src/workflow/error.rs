//! Workflow-specific error types.

use thiserror::Error;
use uuid::Uuid;

use crate::fault::FaultClass;
use crate::store::StoreError;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkflowError {
    /// The item is not in a submittable state.
    #[error("item {item_id} is not an editable workspace item")]
    NotSubmittable {
        /// The item that was refused.
        item_id: Uuid,
    },

    /// The item is already under review.
    #[error("item {item_id} is already under review")]
    AlreadyUnderReview {
        /// The item that was refused.
        item_id: Uuid,
    },

    /// No pool or claimed task exists with this id.
    #[error("task not found: {task_id}")]
    TaskNotFound {
        /// The task id that missed.
        task_id: Uuid,
    },

    /// The pool task was already claimed by another actor.
    #[error("task {task_id} is already claimed by actor {claimant}")]
    AlreadyClaimed {
        /// The contested task.
        task_id: Uuid,
        /// The actor holding the claim.
        claimant: Uuid,
    },

    /// The actor is not an eligible reviewer for this task.
    #[error("actor {actor} is not an eligible reviewer for task {task_id}")]
    NotEligible {
        /// The refused task.
        task_id: Uuid,
        /// The ineligible actor.
        actor: Uuid,
    },

    /// The acting actor does not hold the claim.
    #[error("actor {actor} is not the claimant of task {task_id}")]
    NotClaimant {
        /// The refused task.
        task_id: Uuid,
        /// The non-claimant actor.
        actor: Uuid,
    },

    /// A claimed task references a workflow item the engine no longer
    /// tracks.
    #[error("workflow item not found: {workflow_item_id}")]
    WorkflowItemNotFound {
        /// The missing workflow item.
        workflow_item_id: Uuid,
    },

    /// A collaborator store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    /// Returns the status class for this error.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        match self {
            Self::NotSubmittable { .. } | Self::AlreadyUnderReview { .. } => FaultClass::Conflict,
            Self::TaskNotFound { .. } | Self::WorkflowItemNotFound { .. } => FaultClass::NotFound,
            Self::AlreadyClaimed { .. } => FaultClass::Conflict,
            Self::NotEligible { .. } | Self::NotClaimant { .. } => FaultClass::Forbidden,
            Self::Store(err) => err.class(),
        }
    }
}
