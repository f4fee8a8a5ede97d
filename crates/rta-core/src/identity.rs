//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the RTA Stack.
//! Each identifier is a distinct type — you cannot pass a [`SubjectId`]
//! where a [`CaseId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`OfficeId`], [`ActorId`], [`AssignedNumber`])
//! validate format at construction time. UUID-based identifiers ([`CaseId`],
//! [`SubjectId`], [`CredentialId`]) are always valid by construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for a workflow case (vehicle registration or
/// license application).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(Uuid);

impl CaseId {
    /// Create a new random case identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a case identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for the citizen who owns a case or holds a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(Uuid);

impl SubjectId {
    /// Create a new random subject identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a subject identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for an issued credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialId(Uuid);

impl CredentialId {
    /// Create a new random credential identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a credential identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// Registration office code (e.g., `"MH12"`).
///
/// # Validation
///
/// - Non-empty, at most 16 characters
/// - Uppercase ASCII alphanumeric plus dash
/// - Stored uppercase (lowercase input is normalized)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfficeId(String);

impl OfficeId {
    /// Create an office identifier, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOfficeId`] if the value is empty,
    /// too long, or contains characters outside `[A-Z0-9-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let upper = s.trim().to_uppercase();
        if upper.is_empty() || upper.len() > 16 {
            return Err(ValidationError::InvalidOfficeId(s));
        }
        if !upper
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError::InvalidOfficeId(s));
        }
        Ok(Self(upper))
    }

    /// Access the office code (uppercase).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OfficeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an acting officer or administrator (e.g., `"officer.rto:4412"`).
///
/// # Validation
///
/// - Non-empty, at most 64 characters
/// - ASCII alphanumeric plus `.`, `-`, `_`, `:`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor identifier, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidActorId`] on format violations.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let trimmed = s.trim().to_string();
        if trimmed.is_empty() || trimmed.len() > 64 {
            return Err(ValidationError::InvalidActorId(s));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':'))
        {
            return Err(ValidationError::InvalidActorId(s));
        }
        Ok(Self(trimmed))
    }

    /// Access the actor identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registration or license number assigned at approval time
/// (e.g., `"MH12AB1234"`, `"DL-20260115-X7K2M9"`).
///
/// Doubles as the credential number embedded in the scannable payload.
///
/// # Validation
///
/// - 4–24 characters
/// - Uppercase ASCII alphanumeric plus dash
/// - Stored uppercase (lowercase input is normalized)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignedNumber(String);

impl AssignedNumber {
    /// Create an assigned number, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAssignedNumber`] on format violations.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let upper = s.trim().to_uppercase();
        if upper.len() < 4 || upper.len() > 24 {
            return Err(ValidationError::InvalidAssignedNumber(s));
        }
        if !upper
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError::InvalidAssignedNumber(s));
        }
        Ok(Self(upper))
    }

    /// Access the number string (uppercase).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssignedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- UUID identifiers --

    #[test]
    fn case_id_unique() {
        assert_ne!(CaseId::new(), CaseId::new());
    }

    #[test]
    fn case_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = CaseId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn subject_and_credential_ids_unique() {
        assert_ne!(SubjectId::new(), SubjectId::new());
        assert_ne!(CredentialId::new(), CredentialId::new());
    }

    // -- OfficeId --

    #[test]
    fn office_id_valid_examples() {
        assert!(OfficeId::new("MH12").is_ok());
        assert!(OfficeId::new("KA-01").is_ok());
        assert!(OfficeId::new("RTO-DELHI-NW").is_ok());
    }

    #[test]
    fn office_id_uppercased() {
        let office = OfficeId::new("mh12").unwrap();
        assert_eq!(office.as_str(), "MH12");
    }

    #[test]
    fn office_id_rejects_invalid() {
        assert!(OfficeId::new("").is_err());
        assert!(OfficeId::new("   ").is_err());
        assert!(OfficeId::new("MH 12").is_err()); // interior space
        assert!(OfficeId::new("MH12!").is_err()); // punctuation
        assert!(OfficeId::new("A".repeat(17)).is_err()); // too long
    }

    // -- ActorId --

    #[test]
    fn actor_id_valid_examples() {
        assert!(ActorId::new("officer.rto:4412").is_ok());
        assert!(ActorId::new("admin-7").is_ok());
        assert!(ActorId::new("verifier_22").is_ok());
    }

    #[test]
    fn actor_id_rejects_invalid() {
        assert!(ActorId::new("").is_err());
        assert!(ActorId::new("officer 42").is_err()); // space
        assert!(ActorId::new("officer@rto").is_err()); // @
        assert!(ActorId::new("a".repeat(65)).is_err()); // too long
    }

    // -- AssignedNumber --

    #[test]
    fn assigned_number_valid_examples() {
        assert!(AssignedNumber::new("MH12AB1234").is_ok());
        assert!(AssignedNumber::new("DL-20260115-X7K2M9").is_ok());
        assert!(AssignedNumber::new("AB12").is_ok()); // minimum length
    }

    #[test]
    fn assigned_number_uppercased() {
        let number = AssignedNumber::new("mh12ab1234").unwrap();
        assert_eq!(number.as_str(), "MH12AB1234");
    }

    #[test]
    fn assigned_number_rejects_invalid() {
        assert!(AssignedNumber::new("").is_err());
        assert!(AssignedNumber::new("AB1").is_err()); // too short
        assert!(AssignedNumber::new("MH12 AB").is_err()); // space
        assert!(AssignedNumber::new("MH12#AB").is_err()); // punctuation
        assert!(AssignedNumber::new("A".repeat(25)).is_err()); // too long
    }
}
