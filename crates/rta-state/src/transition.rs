//! Audit records for case transitions.

use rta_core::{ActorId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::status::CaseStatus;

/// One entry in a case's transition log: who moved the case, from where,
/// to where, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Status before the transition.
    pub from: CaseStatus,
    /// Status after the transition.
    pub to: CaseStatus,
    /// The officer or administrator who performed the transition.
    pub actor: ActorId,
    /// When the transition happened.
    pub at: Timestamp,
}

impl TransitionRecord {
    /// Create a transition record.
    pub fn new(from: CaseStatus, to: CaseStatus, actor: ActorId, at: Timestamp) -> Self {
        Self {
            from,
            to,
            actor,
            at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_names() {
        let record = TransitionRecord::new(
            CaseStatus::Submitted,
            CaseStatus::DocVerified,
            ActorId::new("officer.rto:4412").unwrap(),
            Timestamp::now(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["from"], "SUBMITTED");
        assert_eq!(json["to"], "DOC_VERIFIED");
        assert_eq!(json["actor"], "officer.rto:4412");
    }
}
