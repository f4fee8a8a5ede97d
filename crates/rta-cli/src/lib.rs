//! # rta-cli — Command Handlers
//!
//! Subcommand argument types and handlers for the `rta` binary. Handlers
//! return the process exit code so `verify` can signal a mismatch with
//! exit 1 while real failures (unreadable files, bad keys) surface as
//! errors.

pub mod demo;
pub mod key;
pub mod sign;
