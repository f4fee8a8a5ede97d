#![deny(missing_docs)]

//! # rta-workflow — The Case Workflow Engine
//!
//! [`WorkflowEngine`] is the operation surface callers use: every
//! administrative action on a case or credential is one engine method
//! following the same shape — read, validate against the transition
//! table, conditional write through the [`rta_registry::Registry`].
//!
//! ## Concurrency Contract
//!
//! The engine holds no locks of its own. Every write names the status it
//! read; the registry refuses the write if the record moved, and the
//! caller sees [`WorkflowError::Conflict`]. Two concurrent conflicting
//! operations therefore always resolve to exactly one winner.
//!
//! Terminal transitions and credential events are reported to a
//! [`NotificationSink`] after the write commits; sink behavior never
//! affects the operation outcome.

pub mod engine;
pub mod error;
pub mod events;

pub use engine::{ApprovalOutcome, WorkflowEngine};
pub use error::{ConflictCause, WorkflowError};
pub use events::{CaseEvent, NotificationSink, TracingSink};
