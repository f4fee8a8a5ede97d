//! Error types for the core layer.

use thiserror::Error;

/// Errors produced while canonicalizing a value for signing.
#[derive(Debug, Error)]
pub enum CanonicalizationError {
    /// A float was found in the input. Signed fields must be strings or
    /// integers; float formatting differs across runtimes and would break
    /// byte-level determinism.
    #[error("float value {0} rejected: signed fields must be strings or integers")]
    FloatRejected(f64),

    /// The value could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Errors produced by identifier and submission validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Office code failed format validation.
    #[error("invalid office id: {0:?}")]
    InvalidOfficeId(String),

    /// Actor identifier failed format validation.
    #[error("invalid actor id: {0:?}")]
    InvalidActorId(String),

    /// Assigned number failed format validation.
    #[error("invalid assigned number: {0:?}")]
    InvalidAssignedNumber(String),

    /// A submission field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ValidationError {
    /// Construct a field-level validation error.
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
