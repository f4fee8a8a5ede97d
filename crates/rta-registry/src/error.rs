//! Error types for the storage layer.

use rta_core::{AssignedNumber, CaseId, CredentialId, CredentialType, SubjectId};
use rta_credential::CredentialStatus;
use rta_state::CaseStatus;
use thiserror::Error;

/// Errors produced by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A case with this id already exists.
    #[error("case {0} already exists")]
    DuplicateCase(CaseId),

    /// No case with this id.
    #[error("case {0} not found")]
    CaseNotFound(CaseId),

    /// No credential with this id.
    #[error("credential {0} not found")]
    CredentialNotFound(CredentialId),

    /// No credential issued for this case.
    #[error("no credential issued for case {0}")]
    NoCredentialForCase(CaseId),

    /// No credential under this number.
    #[error("no {credential_type} credential numbered {number}")]
    NoCredentialForNumber {
        /// Type that was searched.
        credential_type: CredentialType,
        /// Number that was searched.
        number: AssignedNumber,
    },

    /// A conditional case update found a different status than expected.
    /// The caller lost a race; the store is unchanged.
    #[error("case status is {actual}, expected {expected}")]
    StaleStatus {
        /// Status the caller expected.
        expected: CaseStatus,
        /// Status actually stored.
        actual: CaseStatus,
    },

    /// A conditional credential update found a different status than
    /// expected.
    #[error("credential status is {actual}, expected {expected}")]
    StaleCredentialStatus {
        /// Status the caller expected.
        expected: CredentialStatus,
        /// Status actually stored.
        actual: CredentialStatus,
    },

    /// The case already has a credential; re-issuance is refused.
    #[error("case {case_id} already has a credential")]
    AlreadyIssued {
        /// The credentialed case.
        case_id: CaseId,
    },

    /// Another credential of this type already carries this number.
    #[error("{credential_type} number {number} is already in use")]
    DuplicateNumber {
        /// Type of the colliding credential.
        credential_type: CredentialType,
        /// The number in collision.
        number: AssignedNumber,
    },

    /// The subject already holds an active credential of this type.
    #[error("subject {subject_id} already holds an active {credential_type} credential")]
    ActiveCredentialExists {
        /// The holder.
        subject_id: SubjectId,
        /// Type already held.
        credential_type: CredentialType,
    },
}
