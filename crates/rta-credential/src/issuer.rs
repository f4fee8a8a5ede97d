//! # Credential Issuer
//!
//! Builds, signs, mints numbers for, and renews credentials. The issuer
//! never persists anything — storage, uniqueness, and atomicity belong to
//! the registry transaction driven by the workflow engine.

use std::sync::Arc;

use rand_core::RngCore;
use rta_core::{AssignedNumber, CredentialId, CredentialType, Timestamp};
use rta_crypto::KeyProvider;
use rta_state::{CaseDetails, CaseRecord, CaseStatus};
use serde::Deserialize;

use crate::credential::{Credential, CredentialStatus};
use crate::error::CredentialError;
use crate::payload::{CredentialPayload, SigningInput};

/// Characters used in minted credential numbers. 32 symbols; `0`, `1`,
/// `I`, and `O` are excluded to keep printed numbers unambiguous.
const NUMBER_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Number of random characters in a minted number.
const NUMBER_RANDOM_LEN: usize = 6;

fn default_license_validity_days() -> u32 {
    1825
}

fn default_number_attempts() -> u32 {
    5
}

/// Issuer configuration, YAML-loadable by the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuerConfig {
    /// Validity period for driving licenses, in days.
    #[serde(default = "default_license_validity_days")]
    pub license_validity_days: u32,
    /// Bounded retries when a minted number collides at insert time.
    #[serde(default = "default_number_attempts")]
    pub number_attempts: u32,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            license_validity_days: default_license_validity_days(),
            number_attempts: default_number_attempts(),
        }
    }
}

/// Builds and signs credentials.
pub struct Issuer {
    provider: Arc<dyn KeyProvider>,
    config: IssuerConfig,
}

impl Issuer {
    /// Create an issuer around a key provider and configuration.
    pub fn new(provider: Arc<dyn KeyProvider>, config: IssuerConfig) -> Self {
        Self { provider, config }
    }

    /// Issuer configuration.
    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Mint a credential number: `RC`/`DL` prefix, issue date, and six
    /// random characters from the unambiguous alphabet
    /// (e.g., `"DL-20260115-X7K2M9"`).
    pub fn generate_credential_number(
        credential_type: CredentialType,
        at: Timestamp,
        rng: &mut impl RngCore,
    ) -> AssignedNumber {
        let date = at.as_datetime().format("%Y%m%d");
        let suffix: String = (0..NUMBER_RANDOM_LEN)
            .map(|_| {
                let idx = (rng.next_u32() as usize) % NUMBER_ALPHABET.len();
                NUMBER_ALPHABET[idx] as char
            })
            .collect();
        let number = format!("{}-{date}-{suffix}", credential_type.number_prefix());
        // Prefix, date, and alphabet are all within the validated charset.
        AssignedNumber::new(number).expect("minted number matches the validated format")
    }

    /// Build and sign a credential for an approved case.
    ///
    /// Expiry is computed here: licenses get `issued_at +
    /// license_validity_days`, vehicle registrations are open-ended.
    /// The returned credential is `ACTIVE` but not persisted.
    pub fn issue(
        &self,
        case: &CaseRecord,
        number: &AssignedNumber,
        issued_at: Timestamp,
    ) -> Result<Credential, CredentialError> {
        if case.status != CaseStatus::Approved {
            return Err(CredentialError::CaseNotApprovable(format!(
                "case {} is {}, expected APPROVED",
                case.id, case.status
            )));
        }
        let credential_type = CredentialType::from(case.kind);
        let expires_at = match credential_type {
            CredentialType::License => {
                Some(issued_at.plus_days(self.config.license_validity_days))
            }
            CredentialType::Vehicle => None,
        };
        self.build(
            CredentialId::new(),
            case,
            number,
            credential_type,
            issued_at,
            expires_at,
        )
    }

    /// Re-sign a credential with a fresh expiry.
    ///
    /// Renewable from `ACTIVE` or `EXPIRED`; the new expiry is counted
    /// from the later of `now` and the old expiry, so renewing early does
    /// not shorten the validity window. The credential number never
    /// changes. Open-ended credentials are not renewable.
    pub fn renew(
        &self,
        credential: &Credential,
        now: Timestamp,
    ) -> Result<Credential, CredentialError> {
        match credential.status {
            CredentialStatus::Active | CredentialStatus::Expired => {}
            status => {
                return Err(CredentialError::InvalidCredentialState {
                    credential_id: credential.id,
                    status,
                })
            }
        }
        let old_expiry = credential
            .expires_at
            .ok_or(CredentialError::NotRenewable(credential.id))?;
        let base = old_expiry.max(now);
        let expires_at = Some(base.plus_days(self.config.license_validity_days));

        let input = SigningInput {
            credential_id: credential.id,
            credential_number: credential.credential_number.clone(),
            subject_id: credential.subject_id,
            credential_type: credential.credential_type,
            assigned_number: credential.credential_number.clone(),
            expires_at,
        };
        let canonical = input.to_canonical()?;
        let signature = self.provider.sign(&canonical)?;
        let canonical_payload = String::from_utf8(canonical.into_bytes())
            .expect("canonical JSON is valid UTF-8");

        Ok(Credential {
            issued_at: now,
            expires_at,
            canonical_payload,
            signature,
            status: CredentialStatus::Active,
            ..credential.clone()
        })
    }

    /// The scannable payload for an issued credential.
    ///
    /// Vehicle payloads carry the chassis number from the approving case;
    /// license payloads carry the credential number as `dlNo`.
    pub fn payload_for(&self, credential: &Credential, case: &CaseRecord) -> CredentialPayload {
        let (chassis_number, dl_no) = match &case.details {
            CaseDetails::Vehicle(v) => (Some(v.chassis_number.clone()), None),
            CaseDetails::License(_) => {
                (None, Some(credential.credential_number.as_str().to_string()))
            }
        };
        CredentialPayload {
            credential_type: credential.credential_type,
            number: credential.credential_number.as_str().to_string(),
            sig: credential.signature.to_hex(),
            chassis_number,
            dl_no,
        }
    }

    fn build(
        &self,
        id: CredentialId,
        case: &CaseRecord,
        number: &AssignedNumber,
        credential_type: CredentialType,
        issued_at: Timestamp,
        expires_at: Option<Timestamp>,
    ) -> Result<Credential, CredentialError> {
        let input = SigningInput {
            credential_id: id,
            credential_number: number.clone(),
            subject_id: case.subject_id,
            credential_type,
            assigned_number: number.clone(),
            expires_at,
        };
        let canonical = input.to_canonical()?;
        let signature = self.provider.sign(&canonical)?;
        let canonical_payload = String::from_utf8(canonical.into_bytes())
            .expect("canonical JSON is valid UTF-8");

        Ok(Credential {
            id,
            case_id: case.id,
            subject_id: case.subject_id,
            credential_type,
            credential_number: number.clone(),
            issued_at,
            expires_at,
            canonical_payload,
            signature,
            status: CredentialStatus::Active,
        })
    }
}
