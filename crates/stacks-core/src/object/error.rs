//! Object-model error types.

use thiserror::Error;

use crate::fault::FaultClass;

/// Errors produced while parsing object-model values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ObjectError {
    /// An object type label was not recognized.
    #[error("unknown object type label: {label}")]
    UnknownTypeLabel {
        /// The label that failed to parse.
        label: String,
    },

    /// An object type code was not recognized.
    #[error("unknown object type code: {code}")]
    UnknownTypeCode {
        /// The code that failed to parse.
        code: u8,
    },

    /// A metadata field key was not of the form `schema.element[.qualifier]`.
    #[error("invalid metadata field key: {key}")]
    InvalidMetadataField {
        /// The key that failed to parse.
        key: String,
    },
}

impl ObjectError {
    /// Returns the status class for this error.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        FaultClass::MalformedRequest
    }
}
