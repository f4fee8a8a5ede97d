//! # Case Statuses and Transition Tables
//!
//! [`CaseStatus`] covers both case kinds; the test-track statuses are only
//! reachable for license cases because the vehicle transition table never
//! produces them. The tables are the single source of truth — guard logic
//! in [`crate::case`] and the workflow layer consults them rather than
//! hand-coding edges.

use rta_core::CaseKind;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a workflow case.
///
/// Wire names are SCREAMING_SNAKE_CASE and appear in persisted records and
/// audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Application received, awaiting document verification.
    #[serde(rename = "SUBMITTED")]
    Submitted,
    /// Supporting documents checked by an officer.
    #[serde(rename = "DOC_VERIFIED")]
    DocVerified,
    /// Application rejected. Terminal.
    #[serde(rename = "REJECTED")]
    Rejected,
    /// Driving test booked (license cases only).
    #[serde(rename = "TEST_SCHEDULED")]
    TestScheduled,
    /// Driving test passed (license cases only).
    #[serde(rename = "TEST_PASSED")]
    TestPassed,
    /// Driving test failed; a retake may be scheduled (license cases only).
    #[serde(rename = "TEST_FAILED")]
    TestFailed,
    /// Application approved; a credential has been issued.
    #[serde(rename = "APPROVED")]
    Approved,
    /// Vehicle removed from the road; its credential is revoked. Terminal
    /// (vehicle cases only).
    #[serde(rename = "SCRAPPED")]
    Scrapped,
}

/// Outcome of a driving test attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestResult {
    /// The applicant passed.
    #[serde(rename = "PASS")]
    Pass,
    /// The applicant failed and may retake.
    #[serde(rename = "FAIL")]
    Fail,
}

impl CaseStatus {
    /// Wire-format name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Submitted => "SUBMITTED",
            CaseStatus::DocVerified => "DOC_VERIFIED",
            CaseStatus::Rejected => "REJECTED",
            CaseStatus::TestScheduled => "TEST_SCHEDULED",
            CaseStatus::TestPassed => "TEST_PASSED",
            CaseStatus::TestFailed => "TEST_FAILED",
            CaseStatus::Approved => "APPROVED",
            CaseStatus::Scrapped => "SCRAPPED",
        }
    }

    /// Parse a wire-format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SUBMITTED" => Some(CaseStatus::Submitted),
            "DOC_VERIFIED" => Some(CaseStatus::DocVerified),
            "REJECTED" => Some(CaseStatus::Rejected),
            "TEST_SCHEDULED" => Some(CaseStatus::TestScheduled),
            "TEST_PASSED" => Some(CaseStatus::TestPassed),
            "TEST_FAILED" => Some(CaseStatus::TestFailed),
            "APPROVED" => Some(CaseStatus::Approved),
            "SCRAPPED" => Some(CaseStatus::Scrapped),
            _ => None,
        }
    }

    /// Statuses reachable from this one for the given case kind.
    ///
    /// Returns an empty slice for terminal statuses and for statuses that
    /// the kind's graph never visits.
    pub fn valid_transitions(&self, kind: CaseKind) -> &'static [CaseStatus] {
        match kind {
            CaseKind::Vehicle => match self {
                CaseStatus::Submitted => &[CaseStatus::DocVerified, CaseStatus::Rejected],
                CaseStatus::DocVerified => &[CaseStatus::Approved, CaseStatus::Rejected],
                CaseStatus::Approved => &[CaseStatus::Scrapped],
                _ => &[],
            },
            CaseKind::License => match self {
                CaseStatus::Submitted => &[CaseStatus::DocVerified, CaseStatus::Rejected],
                CaseStatus::DocVerified => &[CaseStatus::TestScheduled, CaseStatus::Rejected],
                CaseStatus::TestScheduled => &[CaseStatus::TestPassed, CaseStatus::TestFailed],
                CaseStatus::TestFailed => &[CaseStatus::TestScheduled],
                CaseStatus::TestPassed => &[CaseStatus::Approved],
                _ => &[],
            },
        }
    }

    /// Whether `to` is reachable from this status in one step under the
    /// given kind's graph.
    pub fn can_transition(&self, kind: CaseKind, to: CaseStatus) -> bool {
        self.valid_transitions(kind).contains(&to)
    }

    /// Whether the status is terminal for the given kind (no outgoing
    /// edges).
    pub fn is_terminal(&self, kind: CaseKind) -> bool {
        self.valid_transitions(kind).is_empty()
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TestResult {
    /// The case status recording this outcome.
    pub fn as_status(&self) -> CaseStatus {
        match self {
            TestResult::Pass => CaseStatus::TestPassed,
            TestResult::Fail => CaseStatus::TestFailed,
        }
    }
}

impl std::fmt::Display for TestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TestResult::Pass => "PASS",
            TestResult::Fail => "FAIL",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CaseStatus; 8] = [
        CaseStatus::Submitted,
        CaseStatus::DocVerified,
        CaseStatus::Rejected,
        CaseStatus::TestScheduled,
        CaseStatus::TestPassed,
        CaseStatus::TestFailed,
        CaseStatus::Approved,
        CaseStatus::Scrapped,
    ];

    #[test]
    fn wire_name_roundtrip() {
        for status in ALL {
            assert_eq!(CaseStatus::from_name(status.as_str()), Some(status));
        }
        assert_eq!(CaseStatus::from_name("UNKNOWN"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&CaseStatus::DocVerified).unwrap(),
            "\"DOC_VERIFIED\""
        );
        assert_eq!(
            serde_json::to_string(&CaseStatus::TestScheduled).unwrap(),
            "\"TEST_SCHEDULED\""
        );
    }

    #[test]
    fn vehicle_graph_edges() {
        let kind = CaseKind::Vehicle;
        assert!(CaseStatus::Submitted.can_transition(kind, CaseStatus::DocVerified));
        assert!(CaseStatus::Submitted.can_transition(kind, CaseStatus::Rejected));
        assert!(CaseStatus::DocVerified.can_transition(kind, CaseStatus::Approved));
        assert!(CaseStatus::DocVerified.can_transition(kind, CaseStatus::Rejected));
        assert!(CaseStatus::Approved.can_transition(kind, CaseStatus::Scrapped));
    }

    #[test]
    fn vehicle_graph_never_visits_test_track() {
        let kind = CaseKind::Vehicle;
        for status in ALL {
            for to in status.valid_transitions(kind) {
                assert!(!matches!(
                    to,
                    CaseStatus::TestScheduled | CaseStatus::TestPassed | CaseStatus::TestFailed
                ));
            }
        }
    }

    #[test]
    fn vehicle_cannot_skip_doc_verification() {
        assert!(!CaseStatus::Submitted.can_transition(CaseKind::Vehicle, CaseStatus::Approved));
    }

    #[test]
    fn license_graph_edges() {
        let kind = CaseKind::License;
        assert!(CaseStatus::DocVerified.can_transition(kind, CaseStatus::TestScheduled));
        assert!(CaseStatus::TestScheduled.can_transition(kind, CaseStatus::TestPassed));
        assert!(CaseStatus::TestScheduled.can_transition(kind, CaseStatus::TestFailed));
        assert!(CaseStatus::TestFailed.can_transition(kind, CaseStatus::TestScheduled));
        assert!(CaseStatus::TestPassed.can_transition(kind, CaseStatus::Approved));
    }

    #[test]
    fn license_cannot_approve_without_test_pass() {
        let kind = CaseKind::License;
        assert!(!CaseStatus::DocVerified.can_transition(kind, CaseStatus::Approved));
        assert!(!CaseStatus::TestScheduled.can_transition(kind, CaseStatus::Approved));
        assert!(!CaseStatus::TestFailed.can_transition(kind, CaseStatus::Approved));
    }

    #[test]
    fn license_cannot_scrap() {
        for status in ALL {
            assert!(!status.can_transition(CaseKind::License, CaseStatus::Scrapped));
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(CaseStatus::Rejected.is_terminal(CaseKind::Vehicle));
        assert!(CaseStatus::Rejected.is_terminal(CaseKind::License));
        assert!(CaseStatus::Scrapped.is_terminal(CaseKind::Vehicle));
        // Approved is terminal for licenses but not for vehicles,
        // which can still be scrapped.
        assert!(CaseStatus::Approved.is_terminal(CaseKind::License));
        assert!(!CaseStatus::Approved.is_terminal(CaseKind::Vehicle));
    }

    #[test]
    fn test_result_maps_to_status() {
        assert_eq!(TestResult::Pass.as_status(), CaseStatus::TestPassed);
        assert_eq!(TestResult::Fail.as_status(), CaseStatus::TestFailed);
    }
}
