//! # Notification Events
//!
//! Terminal case transitions and credential lifecycle changes are
//! reported to a [`NotificationSink`] after the write commits. Delivery
//! is fire-and-forget: a sink that drops, blocks, or panics internally
//! must not change the operation outcome, so implementations are expected
//! to be infallible and fast (hand off to a queue, log, or counter).

use rta_core::{AssignedNumber, CaseId, CredentialId, CredentialType, SubjectId, Timestamp};
use tracing::info;

/// Something downstream dispatchers may want to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseEvent {
    /// A case reached `APPROVED`.
    CaseApproved {
        /// The approved case.
        case_id: CaseId,
        /// The applicant.
        subject_id: SubjectId,
        /// The number assigned at approval.
        number: AssignedNumber,
    },
    /// A case reached `REJECTED`.
    CaseRejected {
        /// The rejected case.
        case_id: CaseId,
        /// Why it was rejected.
        reason: String,
    },
    /// A vehicle case reached `SCRAPPED`.
    CaseScrapped {
        /// The scrapped case.
        case_id: CaseId,
    },
    /// A credential was issued.
    CredentialIssued {
        /// The new credential.
        credential_id: CredentialId,
        /// Its type.
        credential_type: CredentialType,
        /// Its number.
        number: AssignedNumber,
    },
    /// A credential was revoked.
    CredentialRevoked {
        /// The revoked credential.
        credential_id: CredentialId,
    },
    /// A credential was renewed.
    CredentialRenewed {
        /// The renewed credential.
        credential_id: CredentialId,
        /// Its new expiry.
        expires_at: Option<Timestamp>,
    },
    /// A credential was suspended.
    CredentialSuspended {
        /// The suspended credential.
        credential_id: CredentialId,
    },
    /// A suspended credential returned to `ACTIVE`.
    CredentialReinstated {
        /// The reinstated credential.
        credential_id: CredentialId,
    },
}

/// Receives events after the triggering write commits.
pub trait NotificationSink: Send + Sync {
    /// Deliver one event. Must not fail.
    fn notify(&self, event: &CaseEvent);
}

/// Default sink: logs each event at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, event: &CaseEvent) {
        match event {
            CaseEvent::CaseApproved {
                case_id, number, ..
            } => info!(case_id = %case_id, number = %number, "case approved"),
            CaseEvent::CaseRejected { case_id, reason } => {
                info!(case_id = %case_id, reason = %reason, "case rejected")
            }
            CaseEvent::CaseScrapped { case_id } => info!(case_id = %case_id, "case scrapped"),
            CaseEvent::CredentialIssued {
                credential_id,
                credential_type,
                number,
            } => info!(
                credential_id = %credential_id,
                credential_type = %credential_type,
                number = %number,
                "credential issued"
            ),
            CaseEvent::CredentialRevoked { credential_id } => {
                info!(credential_id = %credential_id, "credential revoked")
            }
            CaseEvent::CredentialRenewed { credential_id, .. } => {
                info!(credential_id = %credential_id, "credential renewed")
            }
            CaseEvent::CredentialSuspended { credential_id } => {
                info!(credential_id = %credential_id, "credential suspended")
            }
            CaseEvent::CredentialReinstated { credential_id } => {
                info!(credential_id = %credential_id, "credential reinstated")
            }
        }
    }
}
