#![deny(missing_docs)]

//! # rta-credential — Issuance and Verification
//!
//! The credential layer turns an approved case into a signed, scannable
//! credential and classifies scanned payloads at checkpoints.
//!
//! ## Signing Model
//!
//! A fixed field set (`credentialId`, `credentialNumber`, `subjectId`,
//! `credentialType`, `assignedNumber`, `expiresAt`) is rendered through
//! [`rta_core::CanonicalBytes`] and signed with HMAC-SHA256 via a
//! [`rta_crypto::KeyProvider`]. The credential stores the exact canonical
//! payload that was signed, so verification can re-derive the signature
//! from the authoritative record alone.
//!
//! ## Verification Model
//!
//! [`Verifier::verify`] never mutates anything. It classifies a scanned
//! payload as `VALID`, `TAMPERED`, `EXPIRED`, or `REVOKED` — all four are
//! ordinary outcomes for the relying party, not errors.

pub mod credential;
pub mod error;
pub mod issuer;
pub mod payload;
pub mod verifier;

pub use credential::{Credential, CredentialStatus};
pub use error::CredentialError;
pub use issuer::{Issuer, IssuerConfig};
pub use payload::{CredentialPayload, SigningInput};
pub use verifier::{CredentialLookup, VerificationResult, Verifier};
