//! # The Registry Trait
//!
//! Object-safe persistence contract. All mutations are conditional on the
//! status the caller read; all uniqueness constraints live behind this
//! trait, never in calling code.

use rta_core::{AssignedNumber, CaseId, CredentialId, CredentialType, SubjectId};
use rta_credential::{Credential, CredentialStatus};
use rta_state::{CaseRecord, CaseStatus};

use crate::error::RegistryError;

/// Durable store for cases and credentials.
///
/// Implementations must make each method atomic: concurrent callers see
/// either the state before a call or the state after it, never a partial
/// write.
pub trait Registry: Send + Sync {
    /// Insert a new case.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateCase`] if the id is already present.
    fn insert_case(&self, case: CaseRecord) -> Result<(), RegistryError>;

    /// Fetch a case by id.
    fn case(&self, id: CaseId) -> Result<CaseRecord, RegistryError>;

    /// Replace a case record, conditional on its stored status.
    ///
    /// The write happens only where the stored status equals `expected`;
    /// a miss returns [`RegistryError::StaleStatus`] and changes nothing.
    fn update_case(&self, expected: CaseStatus, updated: CaseRecord) -> Result<(), RegistryError>;

    /// Atomically persist an approval: conditional case update plus
    /// credential insert.
    ///
    /// Enforces, before any mutation:
    /// - the stored case status equals `expected`
    /// - the case has no credential yet ([`RegistryError::AlreadyIssued`])
    /// - the `(type, number)` pair is unused ([`RegistryError::DuplicateNumber`])
    /// - the subject holds no active credential of this type
    ///   ([`RegistryError::ActiveCredentialExists`])
    ///
    /// On any failure both tables are untouched.
    fn approve_case(
        &self,
        expected: CaseStatus,
        updated: CaseRecord,
        credential: Credential,
    ) -> Result<(), RegistryError>;

    /// Atomically persist a scrap: conditional case update plus the
    /// revoked credential update.
    fn scrap_case(
        &self,
        expected: CaseStatus,
        updated: CaseRecord,
        revoked: Credential,
    ) -> Result<(), RegistryError>;

    /// Fetch a credential by id.
    fn credential(&self, id: CredentialId) -> Result<Credential, RegistryError>;

    /// Fetch the credential issued for a case.
    fn credential_for_case(&self, case_id: CaseId) -> Result<Credential, RegistryError>;

    /// Fetch a credential by its type and number.
    fn credential_by_number(
        &self,
        credential_type: CredentialType,
        number: &AssignedNumber,
    ) -> Result<Credential, RegistryError>;

    /// The subject's active credential of the given type, if any.
    fn active_credential(
        &self,
        subject_id: SubjectId,
        credential_type: CredentialType,
    ) -> Option<Credential>;

    /// Replace a credential record, conditional on its stored status.
    ///
    /// Transitions into `ACTIVE` re-check the active-uniqueness index:
    /// renewal and reinstatement cannot put a second active credential of
    /// one type on a subject.
    fn update_credential(
        &self,
        expected: CredentialStatus,
        updated: Credential,
    ) -> Result<(), RegistryError>;
}
