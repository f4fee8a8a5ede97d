//! # Credential Verifier
//!
//! Read-time classification of scanned payloads. The verifier recomputes
//! the signature from the authoritative stored record, never from scanned
//! input, so a forged payload cannot influence what gets signed.
//!
//! Classification order:
//!
//! 1. Unknown number, malformed signature hex, or any payload field
//!    disagreeing with the issued record → `TAMPERED`
//! 2. Signature mismatch (constant-time compare) → `TAMPERED`
//! 3. Stored status `REVOKED` or `SUSPENDED` → `REVOKED`
//! 4. Stored status `EXPIRED`, or past `expires_at` → `EXPIRED`
//! 5. Otherwise → `VALID`

use std::sync::Arc;

use rta_core::{AssignedNumber, CaseId, CredentialType, Timestamp};
use rta_crypto::{KeyProvider, MacSignature};
use rta_state::CaseRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credential::{Credential, CredentialStatus};
use crate::payload::{CredentialPayload, SigningInput};

/// Read access to issued records, implemented by the registry.
///
/// The verifier only needs these two reads; keeping the seam narrow means
/// a checkpoint deployment can back it with a replica or cache.
pub trait CredentialLookup {
    /// Fetch a credential by its type and number.
    fn credential_by_number(
        &self,
        credential_type: CredentialType,
        number: &AssignedNumber,
    ) -> Option<Credential>;

    /// Fetch the case that a credential was issued against.
    fn case(&self, case_id: CaseId) -> Option<CaseRecord>;
}

/// Outcome of verifying a scanned payload.
///
/// A classification, not an error: all four variants are ordinary values
/// the relying party displays distinctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationResult {
    /// Authentic, in force, not expired.
    #[serde(rename = "VALID")]
    Valid,
    /// The payload does not match any authentic issued credential.
    #[serde(rename = "TAMPERED")]
    Tampered,
    /// Authentic but past its expiry.
    #[serde(rename = "EXPIRED")]
    Expired,
    /// Authentic but revoked or suspended.
    #[serde(rename = "REVOKED")]
    Revoked,
}

impl VerificationResult {
    /// Wire-format name of the result.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationResult::Valid => "VALID",
            VerificationResult::Tampered => "TAMPERED",
            VerificationResult::Expired => "EXPIRED",
            VerificationResult::Revoked => "REVOKED",
        }
    }
}

impl std::fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies scanned credential payloads.
pub struct Verifier {
    provider: Arc<dyn KeyProvider>,
}

impl Verifier {
    /// Create a verifier around the issuing key provider.
    pub fn new(provider: Arc<dyn KeyProvider>) -> Self {
        Self { provider }
    }

    /// Parse and classify a scanned JSON payload string.
    ///
    /// Parse failures, including unknown fields, classify as `TAMPERED`.
    pub fn verify_json(
        &self,
        json: &str,
        lookup: &dyn CredentialLookup,
        at: Timestamp,
    ) -> VerificationResult {
        match CredentialPayload::from_json(json) {
            Ok(payload) => self.verify(&payload, lookup, at),
            Err(err) => {
                debug!(%err, "payload failed to parse");
                VerificationResult::Tampered
            }
        }
    }

    /// Classify a parsed payload against the authoritative records.
    pub fn verify(
        &self,
        payload: &CredentialPayload,
        lookup: &dyn CredentialLookup,
        at: Timestamp,
    ) -> VerificationResult {
        let Some(claimed) = parse_signature(&payload.sig) else {
            debug!("signature hex malformed");
            return VerificationResult::Tampered;
        };

        let Ok(number) = AssignedNumber::new(payload.number.clone()) else {
            debug!("credential number malformed");
            return VerificationResult::Tampered;
        };
        let Some(credential) = lookup.credential_by_number(payload.credential_type, &number)
        else {
            debug!(number = %number, "no credential under this number");
            return VerificationResult::Tampered;
        };
        // Exact string comparison: a mis-cased printed number must not
        // verify even though lookup normalization would find the record.
        if payload.number != credential.credential_number.as_str() {
            debug!("printed number differs from issued number");
            return VerificationResult::Tampered;
        }

        if !self.fields_consistent(payload, &credential, lookup) {
            return VerificationResult::Tampered;
        }

        // Recompute from the stored record, never from the payload.
        let input = SigningInput {
            credential_id: credential.id,
            credential_number: credential.credential_number.clone(),
            subject_id: credential.subject_id,
            credential_type: credential.credential_type,
            assigned_number: credential.credential_number.clone(),
            expires_at: credential.expires_at,
        };
        let expected = match input.to_canonical().map(|c| self.provider.sign(&c)) {
            Ok(Ok(sig)) => sig,
            Ok(Err(err)) => {
                debug!(%err, "signing failed during verification");
                return VerificationResult::Tampered;
            }
            Err(err) => {
                debug!(%err, "stored record failed canonicalization");
                return VerificationResult::Tampered;
            }
        };
        if !expected.ct_eq(&claimed) {
            debug!(number = %credential.credential_number, "signature mismatch");
            return VerificationResult::Tampered;
        }

        match credential.status {
            // Suspension reads as revocation to relying parties.
            CredentialStatus::Revoked | CredentialStatus::Suspended => {
                debug!(number = %credential.credential_number, "credential revoked");
                VerificationResult::Revoked
            }
            CredentialStatus::Expired => VerificationResult::Expired,
            CredentialStatus::Active if credential.is_expired_at(at) => {
                VerificationResult::Expired
            }
            CredentialStatus::Active => VerificationResult::Valid,
        }
    }

    /// Check type-specific payload fields against the issued record.
    fn fields_consistent(
        &self,
        payload: &CredentialPayload,
        credential: &Credential,
        lookup: &dyn CredentialLookup,
    ) -> bool {
        match payload.credential_type {
            CredentialType::Vehicle => {
                if payload.dl_no.is_some() {
                    debug!("dlNo present on a vehicle payload");
                    return false;
                }
                let Some(chassis) = payload.chassis_number.as_deref() else {
                    debug!("vehicle payload missing chassisNumber");
                    return false;
                };
                let Some(case) = lookup.case(credential.case_id) else {
                    debug!(case_id = %credential.case_id, "approving case not found");
                    return false;
                };
                if case.chassis_number() != Some(chassis) {
                    debug!("chassisNumber differs from approving case");
                    return false;
                }
                true
            }
            CredentialType::License => {
                if payload.chassis_number.is_some() {
                    debug!("chassisNumber present on a license payload");
                    return false;
                }
                let Some(dl_no) = payload.dl_no.as_deref() else {
                    debug!("license payload missing dlNo");
                    return false;
                };
                if dl_no != credential.credential_number.as_str() {
                    debug!("dlNo differs from issued number");
                    return false;
                }
                true
            }
        }
    }
}

/// Parse a claimed signature: exactly 64 lowercase hex chars.
///
/// Uppercase hex is rejected here even though [`MacSignature::from_hex`]
/// would normalize it: a payload that does not match the issued encoding
/// byte-for-byte was not produced by this issuer.
fn parse_signature(sig: &str) -> Option<MacSignature> {
    if sig.len() != 64 {
        return None;
    }
    if !sig
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return None;
    }
    MacSignature::from_hex(sig).ok()
}
