//! Correction-specific error types.

use thiserror::Error;
use uuid::Uuid;

use crate::fault::FaultClass;
use crate::store::StoreError;
use crate::workflow::WorkflowError;

/// Errors that can occur during correction operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorrectionError {
    /// No correction type with this id is configured.
    #[error("unknown correction type: {type_id}")]
    UnknownType {
        /// The id that missed.
        type_id: String,
    },

    /// The item is not in a state that accepts a metadata correction.
    #[error("item {item_id} is not an installed item and cannot be corrected")]
    NotCorrectable {
        /// The refused item.
        item_id: Uuid,
    },

    /// The item already has an open correction.
    #[error("item {item_id} already has an open correction")]
    AlreadyInProgress {
        /// The contested item.
        item_id: Uuid,
    },

    /// The item is not linked to an original as a correction.
    #[error("item {item_id} is not a correction item")]
    NotACorrection {
        /// The unlinked item.
        item_id: Uuid,
    },

    /// The workflow engine refused the operation.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A collaborator store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CorrectionError {
    /// Returns the status class for this error.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        match self {
            Self::UnknownType { .. } | Self::NotACorrection { .. } => FaultClass::NotFound,
            Self::NotCorrectable { .. } | Self::AlreadyInProgress { .. } => FaultClass::Conflict,
            Self::Workflow(err) => err.class(),
            Self::Store(err) => err.class(),
        }
    }
}
