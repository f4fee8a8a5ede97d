//! # Credential Model
//!
//! An issued, signed credential. The record stores the exact canonical
//! payload that was signed, so the signature can be re-derived and audited
//! without reconstructing state from elsewhere.

use rta_core::{AssignedNumber, CanonicalBytes, CaseId, CredentialId, CredentialType, SubjectId, Timestamp};
use rta_crypto::{KeyProvider, MacSignature};
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

/// Lifecycle status of an issued credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialStatus {
    /// The credential is in force.
    #[serde(rename = "ACTIVE")]
    Active,
    /// Temporarily withdrawn; can be reinstated.
    #[serde(rename = "SUSPENDED")]
    Suspended,
    /// Permanently withdrawn.
    #[serde(rename = "REVOKED")]
    Revoked,
    /// Past its expiry date; renewable.
    #[serde(rename = "EXPIRED")]
    Expired,
}

impl CredentialStatus {
    /// Wire-format name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialStatus::Active => "ACTIVE",
            CredentialStatus::Suspended => "SUSPENDED",
            CredentialStatus::Revoked => "REVOKED",
            CredentialStatus::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issued credential, 1:1 with the case whose approval created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Unique credential identifier.
    pub id: CredentialId,
    /// The approving case.
    pub case_id: CaseId,
    /// The holder.
    pub subject_id: SubjectId,
    /// Registration certificate or driving license.
    pub credential_type: CredentialType,
    /// Globally unique per type; equals the case's assigned number.
    pub credential_number: AssignedNumber,
    /// When the credential was issued (or last renewed).
    pub issued_at: Timestamp,
    /// Expiry; `None` means open-ended (vehicle registrations).
    pub expires_at: Option<Timestamp>,
    /// The exact canonical JSON that was signed. Valid UTF-8 by
    /// construction.
    pub canonical_payload: String,
    /// HMAC-SHA256 over `canonical_payload`.
    pub signature: MacSignature,
    /// Current lifecycle status.
    pub status: CredentialStatus,
}

impl Credential {
    /// Check that the stored signature matches a fresh signing of the
    /// stored canonical payload.
    ///
    /// A `false` result means the record was corrupted after issuance or
    /// signed under a different key. Used for audit sweeps, not for
    /// checkpoint verification (see [`crate::verifier`]).
    pub fn verify_integrity(&self, provider: &dyn KeyProvider) -> Result<bool, CredentialError> {
        let value: serde_json::Value = serde_json::from_str(&self.canonical_payload)
            .map_err(rta_core::CanonicalizationError::SerializationFailed)?;
        let canonical = CanonicalBytes::from_value(value)?;
        let fresh = provider.sign(&canonical)?;
        Ok(fresh.ct_eq(&self.signature))
    }

    /// Whether the credential is past its expiry at the given instant.
    ///
    /// Open-ended credentials never expire.
    pub fn is_expired_at(&self, at: Timestamp) -> bool {
        match self.expires_at {
            Some(expiry) => at > expiry,
            None => false,
        }
    }
}
