//! Task-based review workflow engine.
//!
//! Submissions into a collection with a reviewer group enter review: a
//! pool task is created for the group, one reviewer claims it, and the
//! claimant resolves it with an action. Collections without a reviewer
//! group bypass review entirely.
//!
//! # Architecture
//!
//! ```text
//! submit --> WorkflowItem (UNDER_REVIEW) + PoolTask
//!                 |
//!               claim  (atomic, first claim wins)
//!                 v
//!            ClaimedTask --- approve --------> Approved (item installed)
//!                 |--------- reject ---------> Rejected (item back to workspace)
//!                 `--------- return-to-pool -> fresh PoolTask
//! ```
//!
//! # Key Concepts
//!
//! - **`PoolTask`**: an unclaimed review task visible to every eligible
//!   reviewer; destroyed when claimed
//! - **`ClaimedTask`**: exclusively owned by one reviewer; destroyed when
//!   an action is performed
//! - **Claim atomicity**: all task state lives behind one lock; a claim
//!   either wins outright or fails without side effect
//! - **Claimant enforcement**: actions by anyone but the claimant fail
//!   with an authorization error, never a silent no-op

mod engine;
mod error;
mod state;


pub use engine::WorkflowEngine;
pub use error::WorkflowError;
pub use state::{
    Action, ActionOutcome, ApprovalEffect, ClaimedTask, Disposition, PoolTask, SubmitOutcome,
    TaskRecipients, WorkflowItem, WorkflowState,
};
