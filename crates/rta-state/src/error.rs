//! Error types for the state layer.

use rta_core::CaseKind;
use thiserror::Error;

use crate::status::CaseStatus;

/// Errors produced by guarded case transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The requested edge does not exist in the kind's transition graph.
    #[error("invalid transition for {kind} case: {from} -> {to}")]
    InvalidTransition {
        /// Kind of the case.
        kind: CaseKind,
        /// Status the case was in.
        from: CaseStatus,
        /// Status the caller tried to reach.
        to: CaseStatus,
    },
}
