#![deny(missing_docs)]

//! # rta-registry — Case and Credential Store
//!
//! The [`Registry`] trait is the persistence seam of the stack. Its
//! contract carries the two guarantees the workflow engine builds on:
//!
//! - **Conditional updates.** Every mutation names the status it expects
//!   to find; a miss returns a stale-status error instead of overwriting.
//!   Per-case serialization falls out of this — no application locks.
//! - **Atomic approve-and-issue.** [`Registry::approve_case`] persists the
//!   case update and the credential insert as one unit, enforcing
//!   one-credential-per-case, per-type number uniqueness, and
//!   at-most-one-active-per-subject inside the store.
//!
//! [`InMemoryRegistry`] is the reference implementation: both tables and
//! all three uniqueness indexes behind one `parking_lot::RwLock`.

pub mod error;
pub mod memory;
pub mod registry;

pub use error::RegistryError;
pub use memory::InMemoryRegistry;
pub use registry::Registry;
