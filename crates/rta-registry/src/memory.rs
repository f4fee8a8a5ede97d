//! # In-Memory Registry
//!
//! Reference implementation: both tables plus three uniqueness indexes
//! behind one `parking_lot::RwLock`. The write lock is the transactional
//! boundary — every mutating method validates everything it needs before
//! touching either table, so a failed call leaves the store exactly as it
//! found it.

use std::collections::HashMap;

use parking_lot::RwLock;
use rta_core::{AssignedNumber, CaseId, CredentialId, CredentialType, SubjectId};
use rta_credential::{Credential, CredentialLookup, CredentialStatus};
use rta_state::{CaseRecord, CaseStatus};

use crate::error::RegistryError;
use crate::registry::Registry;

#[derive(Default)]
struct Inner {
    cases: HashMap<CaseId, CaseRecord>,
    credentials: HashMap<CredentialId, Credential>,
    // Uniqueness indexes. Kept in lockstep with the tables; all three are
    // consulted and updated under the same write lock acquisition.
    by_case: HashMap<CaseId, CredentialId>,
    by_number: HashMap<(CredentialType, AssignedNumber), CredentialId>,
    active: HashMap<(SubjectId, CredentialType), CredentialId>,
}

impl Inner {
    fn check_case_status(&self, id: CaseId, expected: CaseStatus) -> Result<(), RegistryError> {
        let stored = self
            .cases
            .get(&id)
            .ok_or(RegistryError::CaseNotFound(id))?;
        if stored.status != expected {
            return Err(RegistryError::StaleStatus {
                expected,
                actual: stored.status,
            });
        }
        Ok(())
    }

    fn index_credential(&mut self, credential: &Credential) {
        self.by_case.insert(credential.case_id, credential.id);
        self.by_number.insert(
            (credential.credential_type, credential.credential_number.clone()),
            credential.id,
        );
        if credential.status == CredentialStatus::Active {
            self.active.insert(
                (credential.subject_id, credential.credential_type),
                credential.id,
            );
        }
    }

    /// Keep the active index aligned after a credential status change.
    fn reindex_active(&mut self, updated: &Credential) {
        let key = (updated.subject_id, updated.credential_type);
        match updated.status {
            CredentialStatus::Active => {
                self.active.insert(key, updated.id);
            }
            _ => {
                if self.active.get(&key) == Some(&updated.id) {
                    self.active.remove(&key);
                }
            }
        }
    }
}

/// Thread-safe in-memory [`Registry`].
#[derive(Default)]
pub struct InMemoryRegistry {
    inner: RwLock<Inner>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Registry for InMemoryRegistry {
    fn insert_case(&self, case: CaseRecord) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();
        if inner.cases.contains_key(&case.id) {
            return Err(RegistryError::DuplicateCase(case.id));
        }
        inner.cases.insert(case.id, case);
        Ok(())
    }

    fn case(&self, id: CaseId) -> Result<CaseRecord, RegistryError> {
        self.inner
            .read()
            .cases
            .get(&id)
            .cloned()
            .ok_or(RegistryError::CaseNotFound(id))
    }

    fn update_case(&self, expected: CaseStatus, updated: CaseRecord) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();
        inner.check_case_status(updated.id, expected)?;
        inner.cases.insert(updated.id, updated);
        Ok(())
    }

    fn approve_case(
        &self,
        expected: CaseStatus,
        updated: CaseRecord,
        credential: Credential,
    ) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();

        // All checks before any mutation.
        inner.check_case_status(updated.id, expected)?;
        if inner.by_case.contains_key(&updated.id) {
            return Err(RegistryError::AlreadyIssued {
                case_id: updated.id,
            });
        }
        let number_key = (
            credential.credential_type,
            credential.credential_number.clone(),
        );
        if inner.by_number.contains_key(&number_key) {
            return Err(RegistryError::DuplicateNumber {
                credential_type: credential.credential_type,
                number: credential.credential_number.clone(),
            });
        }
        let active_key = (credential.subject_id, credential.credential_type);
        if inner.active.contains_key(&active_key) {
            return Err(RegistryError::ActiveCredentialExists {
                subject_id: credential.subject_id,
                credential_type: credential.credential_type,
            });
        }

        inner.cases.insert(updated.id, updated);
        inner.index_credential(&credential);
        inner.credentials.insert(credential.id, credential);
        Ok(())
    }

    fn scrap_case(
        &self,
        expected: CaseStatus,
        updated: CaseRecord,
        revoked: Credential,
    ) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();

        inner.check_case_status(updated.id, expected)?;
        if !inner.credentials.contains_key(&revoked.id) {
            return Err(RegistryError::CredentialNotFound(revoked.id));
        }

        inner.cases.insert(updated.id, updated);
        inner.reindex_active(&revoked);
        inner.credentials.insert(revoked.id, revoked);
        Ok(())
    }

    fn credential(&self, id: CredentialId) -> Result<Credential, RegistryError> {
        self.inner
            .read()
            .credentials
            .get(&id)
            .cloned()
            .ok_or(RegistryError::CredentialNotFound(id))
    }

    fn credential_for_case(&self, case_id: CaseId) -> Result<Credential, RegistryError> {
        let inner = self.inner.read();
        let id = inner
            .by_case
            .get(&case_id)
            .ok_or(RegistryError::NoCredentialForCase(case_id))?;
        Ok(inner.credentials[id].clone())
    }

    fn credential_by_number(
        &self,
        credential_type: CredentialType,
        number: &AssignedNumber,
    ) -> Result<Credential, RegistryError> {
        let inner = self.inner.read();
        let id = inner
            .by_number
            .get(&(credential_type, number.clone()))
            .ok_or_else(|| RegistryError::NoCredentialForNumber {
                credential_type,
                number: number.clone(),
            })?;
        Ok(inner.credentials[id].clone())
    }

    fn active_credential(
        &self,
        subject_id: SubjectId,
        credential_type: CredentialType,
    ) -> Option<Credential> {
        let inner = self.inner.read();
        let id = inner.active.get(&(subject_id, credential_type))?;
        inner.credentials.get(id).cloned()
    }

    fn update_credential(
        &self,
        expected: CredentialStatus,
        updated: Credential,
    ) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();

        let stored = inner
            .credentials
            .get(&updated.id)
            .ok_or(RegistryError::CredentialNotFound(updated.id))?;
        if stored.status != expected {
            return Err(RegistryError::StaleCredentialStatus {
                expected,
                actual: stored.status,
            });
        }
        // A transition into ACTIVE re-checks subject uniqueness.
        if updated.status == CredentialStatus::Active {
            let key = (updated.subject_id, updated.credential_type);
            if let Some(holder) = inner.active.get(&key) {
                if *holder != updated.id {
                    return Err(RegistryError::ActiveCredentialExists {
                        subject_id: updated.subject_id,
                        credential_type: updated.credential_type,
                    });
                }
            }
        }

        inner.reindex_active(&updated);
        inner.credentials.insert(updated.id, updated);
        Ok(())
    }
}

impl CredentialLookup for InMemoryRegistry {
    fn credential_by_number(
        &self,
        credential_type: CredentialType,
        number: &AssignedNumber,
    ) -> Option<Credential> {
        Registry::credential_by_number(self, credential_type, number).ok()
    }

    fn case(&self, case_id: CaseId) -> Option<CaseRecord> {
        Registry::case(self, case_id).ok()
    }
}
