//! # Workflow Error Taxonomy
//!
//! [`WorkflowError`] is the public error surface of the stack: whatever a
//! lower layer reports, calling layers see one of these variants. The
//! mapping collapses storage-level detail into what a caller can act on —
//! most notably, every lost race becomes
//! [`WorkflowError::Conflict`]`(`[`ConflictCause::ConcurrentUpdate`]`)`,
//! the only retryable classification.

use rta_core::{CanonicalizationError, CaseId, CaseKind, CredentialId, ValidationError};
use rta_credential::{CredentialError, CredentialStatus};
use rta_crypto::CryptoError;
use rta_registry::RegistryError;
use rta_state::{CaseStatus, StateError};
use thiserror::Error;

/// Why a conflicting write was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCause {
    /// The record moved between read and write; retrying may succeed.
    ConcurrentUpdate,
    /// The supplied number is already in use for the type.
    DuplicateNumber,
    /// The subject already holds an active credential of the type.
    ActiveCredentialExists,
    /// Bounded number-minting retries were exhausted.
    NumberSpaceExhausted,
}

impl std::fmt::Display for ConflictCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConflictCause::ConcurrentUpdate => "concurrent update",
            ConflictCause::DuplicateNumber => "duplicate number",
            ConflictCause::ActiveCredentialExists => "active credential exists",
            ConflictCause::NumberSpaceExhausted => "number space exhausted",
        })
    }
}

/// Errors returned by [`crate::WorkflowEngine`] operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Unknown case id.
    #[error("case {0} not found")]
    CaseNotFound(CaseId),

    /// Unknown credential id.
    #[error("credential {0} not found")]
    CredentialNotFound(CredentialId),

    /// The operation is not legal from the case's current status. The
    /// case is untouched; the caller picked the wrong operation, not the
    /// wrong moment.
    #[error("invalid transition for {kind} case {case_id}: {from} -> {to}")]
    InvalidTransition {
        /// The case in question.
        case_id: CaseId,
        /// Its kind.
        kind: CaseKind,
        /// Status the case was in.
        from: CaseStatus,
        /// Status the operation targets.
        to: CaseStatus,
    },

    /// The write lost to a concurrent one, or a uniqueness constraint
    /// refused it.
    #[error("conflict: {0}")]
    Conflict(ConflictCause),

    /// Issuance re-invoked against a case that already has a credential.
    #[error("case {case_id} already has a credential")]
    AlreadyIssued {
        /// The credentialed case.
        case_id: CaseId,
    },

    /// Credential administration attempted from an ineligible status.
    #[error("credential {credential_id} is {status}, operation not allowed")]
    InvalidCredentialState {
        /// The credential in question.
        credential_id: CredentialId,
        /// Its current status.
        status: CredentialStatus,
    },

    /// Renewal attempted on an open-ended credential.
    #[error("credential {0} has no expiry and is not renewable")]
    NotRenewable(CredentialId),

    /// A submission field or identifier failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A signing input could not be canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// The key provider failed.
    #[error(transparent)]
    Signing(#[from] CryptoError),
}

impl WorkflowError {
    /// Whether retrying the same call may succeed without the caller
    /// changing anything.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WorkflowError::Conflict(ConflictCause::ConcurrentUpdate)
        )
    }

    /// Attach a case id to a transition-table refusal.
    pub(crate) fn from_state(case_id: CaseId, err: StateError) -> Self {
        let StateError::InvalidTransition { kind, from, to } = err;
        WorkflowError::InvalidTransition {
            case_id,
            kind,
            from,
            to,
        }
    }
}

impl From<RegistryError> for WorkflowError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::CaseNotFound(id) => WorkflowError::CaseNotFound(id),
            RegistryError::CredentialNotFound(id) => WorkflowError::CredentialNotFound(id),
            RegistryError::AlreadyIssued { case_id } => WorkflowError::AlreadyIssued { case_id },
            RegistryError::DuplicateNumber { .. } => {
                WorkflowError::Conflict(ConflictCause::DuplicateNumber)
            }
            RegistryError::ActiveCredentialExists { .. } => {
                WorkflowError::Conflict(ConflictCause::ActiveCredentialExists)
            }
            // Conditional-write misses and records moving under the
            // engine's read are all the same thing to a caller: a lost
            // race.
            RegistryError::DuplicateCase(_)
            | RegistryError::StaleStatus { .. }
            | RegistryError::StaleCredentialStatus { .. }
            | RegistryError::NoCredentialForCase(_)
            | RegistryError::NoCredentialForNumber { .. } => {
                WorkflowError::Conflict(ConflictCause::ConcurrentUpdate)
            }
        }
    }
}

impl From<CredentialError> for WorkflowError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentialState {
                credential_id,
                status,
            } => WorkflowError::InvalidCredentialState {
                credential_id,
                status,
            },
            CredentialError::NotRenewable(id) => WorkflowError::NotRenewable(id),
            CredentialError::Canonicalization(e) => WorkflowError::Canonicalization(e),
            CredentialError::Crypto(e) => WorkflowError::Signing(e),
            // The engine only builds credentials for cases it just moved
            // to APPROVED; reaching this means the record moved under us.
            CredentialError::CaseNotApprovable(_) => {
                WorkflowError::Conflict(ConflictCause::ConcurrentUpdate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_concurrent_update_is_retryable() {
        assert!(WorkflowError::Conflict(ConflictCause::ConcurrentUpdate).is_retryable());
        assert!(!WorkflowError::Conflict(ConflictCause::DuplicateNumber).is_retryable());
        assert!(!WorkflowError::Conflict(ConflictCause::NumberSpaceExhausted).is_retryable());
        assert!(!WorkflowError::CaseNotFound(CaseId::new()).is_retryable());
    }

    #[test]
    fn stale_status_maps_to_conflict() {
        let err: WorkflowError = RegistryError::StaleStatus {
            expected: CaseStatus::Submitted,
            actual: CaseStatus::DocVerified,
        }
        .into();
        assert!(matches!(
            err,
            WorkflowError::Conflict(ConflictCause::ConcurrentUpdate)
        ));
    }
}
