//! Correction types and the correction-via-shadow-item coordinator.
//!
//! Two cooperating pieces live here. The [`CorrectionCatalog`] answers
//! which state-change correction types (withdraw, reinstate, ...) apply to
//! an item, driven purely by each type's configured predicate. The
//! [`CorrectionCoordinator`] runs metadata corrections: it creates a
//! shadow workspace item linked to an installed original, routes it
//! through the review workflow, and merges or keeps it depending on the
//! verdict.
//!
//! # Key Concepts
//!
//! - **Correction item**: a transient shadow item holding proposed edits,
//!   linked to its original by an `isCorrectionOfItem` relationship
//! - **At most one open correction** per original item at a time
//! - **Verdict asymmetry**: approval and the no-reviewer auto-apply path
//!   merge the edits and delete the shadow; rejection keeps the shadow
//!   addressable and re-editable

mod catalog;
mod coordinator;
mod error;

#[cfg(test)]
mod tests;

pub use catalog::{AppliesWhen, CorrectionCatalog, CorrectionType};
pub use coordinator::{
    AppliedCorrection, CorrectionCoordinator, CorrectionReview, CORRECTION_LEFTWARD,
    CORRECTION_RIGHTWARD,
};
pub use error::CorrectionError;
