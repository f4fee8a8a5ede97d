#![deny(missing_docs)]

//! # rta-crypto — Keyed-Digest Signing for the RTA Stack
//!
//! HMAC-SHA256 over canonical bytes. The signing input type is
//! [`rta_core::CanonicalBytes`], so every signature in the stack is
//! computed over deterministically canonicalized data.
//!
//! ## Security Invariants
//!
//! - You cannot sign raw `&[u8]` — the input type is `&CanonicalBytes`.
//! - Key material zeroizes on drop and never appears in `Debug` output.
//! - Signature comparison is constant-time ([`MacSignature::ct_eq`]).
//!
//! ## Key Providers
//!
//! The [`KeyProvider`] trait is the seam between issuance/verification
//! logic and key custody. [`LocalKeyProvider`] holds an in-process key;
//! [`EnvKeyProvider`] loads one from the environment and fails fast when
//! it is absent.

pub mod error;
pub mod key_provider;
pub mod mac;

pub use error::CryptoError;
pub use key_provider::{EnvKeyProvider, KeyProvider, LocalKeyProvider, SIGNING_KEY_ENV};
pub use mac::{compute_mac, MacKey, MacSignature};
