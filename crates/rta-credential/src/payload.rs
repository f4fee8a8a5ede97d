//! # Signing Input and Scannable Payload
//!
//! Two wire shapes live here:
//!
//! - [`SigningInput`] — the fixed field set that gets canonicalized and
//!   signed. Adding or removing a field invalidates every credential in
//!   the field, so the shape is closed.
//! - [`CredentialPayload`] — the JSON embedded in the printed/scannable
//!   artifact that relying parties scan at checkpoints.

use rta_core::{
    AssignedNumber, CanonicalBytes, CanonicalizationError, CredentialId, CredentialType,
    SubjectId, Timestamp,
};
use serde::{Deserialize, Serialize};

/// The fixed field set over which the credential signature is computed.
///
/// Serialized with camelCase keys, then canonicalized (sorted keys,
/// compact separators, UTC second-precision timestamps) before signing.
/// `expiresAt` is always present, `null` for open-ended credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningInput {
    /// Credential identifier.
    pub credential_id: CredentialId,
    /// The credential number printed on the artifact.
    pub credential_number: AssignedNumber,
    /// The holder.
    pub subject_id: SubjectId,
    /// Registration certificate or driving license.
    pub credential_type: CredentialType,
    /// The case's assigned number (equals `credential_number`).
    pub assigned_number: AssignedNumber,
    /// Expiry, `null` when open-ended.
    pub expires_at: Option<Timestamp>,
}

impl SigningInput {
    /// Render the signing input as canonical bytes.
    pub fn to_canonical(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(self)
    }
}

/// The JSON payload embedded in the scannable credential artifact.
///
/// Unknown fields are rejected at parse time: a payload with extra keys
/// was not produced by this issuer and classifies as tampered.
///
/// - vehicle: `{"type":"VEHICLE","number":…,"sig":…,"chassisNumber":…}`
/// - license: `{"type":"LICENSE","number":…,"sig":…,"dlNo":…}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialPayload {
    /// Credential type wire name.
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    /// The credential number as printed. Kept as a raw string so that
    /// verification compares exactly what was scanned.
    pub number: String,
    /// Claimed signature, 64 lowercase hex chars. Kept as a raw string so
    /// mis-cased or malformed hex classifies as tampered rather than
    /// failing parse.
    pub sig: String,
    /// Chassis number, vehicle payloads only.
    #[serde(rename = "chassisNumber", skip_serializing_if = "Option::is_none")]
    pub chassis_number: Option<String>,
    /// License number, license payloads only. Duplicates `number`.
    #[serde(rename = "dlNo", skip_serializing_if = "Option::is_none")]
    pub dl_no: Option<String>,
}

impl CredentialPayload {
    /// Serialize the payload for embedding in the scannable artifact.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a scanned payload string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
