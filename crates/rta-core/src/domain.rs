//! # Domain Enums
//!
//! Case kinds and credential types shared across the workflow, issuance,
//! and verification layers.
//!
//! Wire names are SCREAMING_SNAKE_CASE strings. These values appear in
//! persisted records and in signed payloads, so renaming a variant is a
//! breaking change to every credential already in the field.

use serde::{Deserialize, Serialize};

/// The kind of workflow case being processed.
///
/// The kind is fixed at submission and determines which transition graph
/// applies to the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseKind {
    /// A vehicle registration application.
    #[serde(rename = "VEHICLE")]
    Vehicle,
    /// A driving license application.
    #[serde(rename = "LICENSE")]
    License,
}

impl CaseKind {
    /// Wire-format name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseKind::Vehicle => "VEHICLE",
            CaseKind::License => "LICENSE",
        }
    }

    /// Parse a wire-format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "VEHICLE" => Some(CaseKind::Vehicle),
            "LICENSE" => Some(CaseKind::License),
            _ => None,
        }
    }
}

impl std::fmt::Display for CaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of an issued credential.
///
/// Mirrors [`CaseKind`] one-to-one: an approved vehicle case yields a
/// `Vehicle` credential, an approved license case a `License` credential.
/// Kept as a distinct type because the credential layer must not depend
/// on workflow semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialType {
    /// A vehicle registration certificate.
    #[serde(rename = "VEHICLE")]
    Vehicle,
    /// A driving license.
    #[serde(rename = "LICENSE")]
    License,
}

impl CredentialType {
    /// Wire-format name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::Vehicle => "VEHICLE",
            CredentialType::License => "LICENSE",
        }
    }

    /// Parse a wire-format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "VEHICLE" => Some(CredentialType::Vehicle),
            "LICENSE" => Some(CredentialType::License),
            _ => None,
        }
    }

    /// Prefix used when minting credential numbers (`RC` for registration
    /// certificates, `DL` for driving licenses).
    pub fn number_prefix(&self) -> &'static str {
        match self {
            CredentialType::Vehicle => "RC",
            CredentialType::License => "DL",
        }
    }
}

impl From<CaseKind> for CredentialType {
    fn from(kind: CaseKind) -> Self {
        match kind {
            CaseKind::Vehicle => CredentialType::Vehicle,
            CaseKind::License => CredentialType::License,
        }
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&CaseKind::Vehicle).unwrap(),
            "\"VEHICLE\""
        );
        assert_eq!(
            serde_json::to_string(&CaseKind::License).unwrap(),
            "\"LICENSE\""
        );
    }

    #[test]
    fn case_kind_from_name_roundtrip() {
        for kind in [CaseKind::Vehicle, CaseKind::License] {
            assert_eq!(CaseKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(CaseKind::from_name("BOAT"), None);
    }

    #[test]
    fn credential_type_from_case_kind() {
        assert_eq!(
            CredentialType::from(CaseKind::Vehicle),
            CredentialType::Vehicle
        );
        assert_eq!(
            CredentialType::from(CaseKind::License),
            CredentialType::License
        );
    }

    #[test]
    fn number_prefixes() {
        assert_eq!(CredentialType::Vehicle.number_prefix(), "RC");
        assert_eq!(CredentialType::License.number_prefix(), "DL");
    }
}
