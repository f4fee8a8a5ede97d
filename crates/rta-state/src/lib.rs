#![deny(missing_docs)]

//! # rta-state — Case Lifecycle State Machines
//!
//! Vehicle registration and driving license cases share a single record
//! type ([`CaseRecord`]) and status enum ([`CaseStatus`]), but each case
//! kind has its own transition graph. The graphs are static tables —
//! every transition a case can make is enumerable at compile time, and
//! [`CaseRecord`] methods refuse anything the table does not allow.
//!
//! ## Transition Graphs
//!
//! Vehicle registration:
//!
//! ```text
//! SUBMITTED ──▶ DOC_VERIFIED ──▶ APPROVED ──▶ SCRAPPED
//!     │               │
//!     ▼               ▼
//!  REJECTED        REJECTED
//! ```
//!
//! Driving license:
//!
//! ```text
//! SUBMITTED ──▶ DOC_VERIFIED ──▶ TEST_SCHEDULED ──▶ TEST_PASSED ──▶ APPROVED
//!     │               │                │
//!     ▼               ▼                ▼
//!  REJECTED        REJECTED       TEST_FAILED ──▶ TEST_SCHEDULED (retake)
//! ```
//!
//! Every successful transition appends a [`TransitionRecord`] to the
//! case's audit log.

pub mod case;
pub mod error;
pub mod status;
pub mod transition;

pub use case::{
    CaseDetails, CaseRecord, CaseSubmission, LicenseDetails, LicenseSubmission, VehicleDetails,
    VehicleSubmission,
};
pub use error::StateError;
pub use status::{CaseStatus, TestResult};
pub use transition::TransitionRecord;
