#![deny(missing_docs)]

//! # rta-core — Foundational Types for the RTA Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a distinct
//!    type. You cannot pass a [`SubjectId`] where a [`CaseId`] is expected.
//!
//! 2. **[`CanonicalBytes`] is the sole path to signing input.** All keyed-digest
//!    computation in the entire stack flows through `CanonicalBytes::new()`,
//!    which applies deterministic canonicalization (float rejection, datetime
//!    normalization, sorted keys, compact separators).
//!
//! 3. **Validated string identifiers.** [`OfficeId`], [`ActorId`], and
//!    [`AssignedNumber`] enforce format constraints at construction time, so
//!    malformed inputs never reach the workflow or issuance layers.

pub mod canonical;
pub mod domain;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use domain::{CaseKind, CredentialType};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{ActorId, AssignedNumber, CaseId, CredentialId, OfficeId, SubjectId};
pub use temporal::Timestamp;
