//! # Case Records
//!
//! [`CaseRecord`] is the persisted unit of the workflow. Every mutation
//! goes through a guarded method that consults the transition table for
//! the case's kind; an illegal transition returns
//! [`StateError::InvalidTransition`] and leaves the record untouched.
//! Each successful transition appends to the audit log.

use rta_core::{
    ActorId, AssignedNumber, CaseId, CaseKind, OfficeId, SubjectId, Timestamp, ValidationError,
};
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::status::{CaseStatus, TestResult};
use crate::transition::TransitionRecord;

// ---------------------------------------------------------------------------
// Submissions (validated input)
// ---------------------------------------------------------------------------

/// A vehicle registration application as submitted by a citizen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSubmission {
    /// Vehicle category (e.g., `"MOTORCYCLE"`, `"CAR"`).
    pub vehicle_type: String,
    /// Manufacturer name.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Year of manufacture.
    pub year: u16,
    /// Body color.
    pub color: String,
    /// Engine number stamped on the block.
    pub engine_number: String,
    /// Chassis number (VIN).
    pub chassis_number: String,
    /// Fuel type (e.g., `"PETROL"`, `"ELECTRIC"`).
    pub fuel_type: String,
}

/// A driving license application as submitted by a citizen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSubmission {
    /// License category applied for (e.g., `"LMV"`, `"MCWG"`).
    pub license_type: String,
}

/// Either kind of application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseSubmission {
    /// A vehicle registration application.
    Vehicle(VehicleSubmission),
    /// A driving license application.
    License(LicenseSubmission),
}

fn require_nonempty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::field(field, "must not be empty"));
    }
    Ok(())
}

fn require_serial(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.len();
    if len < min || len > max {
        return Err(ValidationError::field(
            field,
            format!("length must be {min}-{max} chars, got {len}"),
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(ValidationError::field(
            field,
            "must be uppercase alphanumeric",
        ));
    }
    Ok(())
}

impl VehicleSubmission {
    /// Validate all submission fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_nonempty("vehicleType", &self.vehicle_type)?;
        require_nonempty("make", &self.make)?;
        require_nonempty("model", &self.model)?;
        require_nonempty("color", &self.color)?;
        require_nonempty("fuelType", &self.fuel_type)?;
        if !(1900..=2100).contains(&self.year) {
            return Err(ValidationError::field(
                "year",
                format!("must be 1900-2100, got {}", self.year),
            ));
        }
        require_serial("chassisNumber", &self.chassis_number, 5, 32)?;
        require_serial("engineNumber", &self.engine_number, 3, 32)?;
        Ok(())
    }
}

impl LicenseSubmission {
    /// Validate all submission fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_nonempty("licenseType", &self.license_type)
    }
}

impl CaseSubmission {
    /// Validate the inner submission.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            CaseSubmission::Vehicle(v) => v.validate(),
            CaseSubmission::License(l) => l.validate(),
        }
    }

    /// The case kind this submission opens.
    pub fn kind(&self) -> CaseKind {
        match self {
            CaseSubmission::Vehicle(_) => CaseKind::Vehicle,
            CaseSubmission::License(_) => CaseKind::License,
        }
    }
}

// ---------------------------------------------------------------------------
// Details (persisted application data)
// ---------------------------------------------------------------------------

/// Vehicle application data carried on the case after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    /// Vehicle category.
    pub vehicle_type: String,
    /// Manufacturer name.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Year of manufacture.
    pub year: u16,
    /// Body color.
    pub color: String,
    /// Engine number.
    pub engine_number: String,
    /// Chassis number (VIN).
    pub chassis_number: String,
    /// Fuel type.
    pub fuel_type: String,
}

/// License application data carried on the case after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDetails {
    /// License category applied for.
    pub license_type: String,
}

/// Kind-specific application data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseDetails {
    /// Vehicle registration data.
    Vehicle(VehicleDetails),
    /// Driving license data.
    License(LicenseDetails),
}

impl From<VehicleSubmission> for VehicleDetails {
    fn from(s: VehicleSubmission) -> Self {
        Self {
            vehicle_type: s.vehicle_type,
            make: s.make,
            model: s.model,
            year: s.year,
            color: s.color,
            engine_number: s.engine_number,
            chassis_number: s.chassis_number,
            fuel_type: s.fuel_type,
        }
    }
}

impl From<LicenseSubmission> for LicenseDetails {
    fn from(s: LicenseSubmission) -> Self {
        Self {
            license_type: s.license_type,
        }
    }
}

impl From<CaseSubmission> for CaseDetails {
    fn from(s: CaseSubmission) -> Self {
        match s {
            CaseSubmission::Vehicle(v) => CaseDetails::Vehicle(v.into()),
            CaseSubmission::License(l) => CaseDetails::License(l.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// CaseRecord
// ---------------------------------------------------------------------------

/// A workflow case: one application moving through its kind's transition
/// graph.
///
/// Cases are never deleted; terminal statuses just admit no further
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Unique case identifier.
    pub id: CaseId,
    /// The citizen who applied.
    pub subject_id: SubjectId,
    /// The office processing the case.
    pub office_id: OfficeId,
    /// Fixed at submission; selects the transition graph.
    pub kind: CaseKind,
    /// Current lifecycle status.
    pub status: CaseStatus,
    /// When the application was received.
    pub submitted_at: Timestamp,
    /// Officer who verified documents, once verified.
    pub verified_by: Option<ActorId>,
    /// When documents were verified.
    pub verified_at: Option<Timestamp>,
    /// Officer who approved the case, once approved.
    pub approved_by: Option<ActorId>,
    /// When the case was approved.
    pub approved_at: Option<Timestamp>,
    /// Why the case was rejected, if it was.
    pub rejected_reason: Option<String>,
    /// Booked driving-test slot (license cases only).
    pub test_scheduled_at: Option<Timestamp>,
    /// Most recent driving-test outcome (license cases only).
    pub test_result: Option<TestResult>,
    /// Registration/license number, set at approval.
    pub assigned_number: Option<AssignedNumber>,
    /// When the vehicle was scrapped, if it was.
    pub terminated_at: Option<Timestamp>,
    /// Kind-specific application data.
    pub details: CaseDetails,
    /// Append-only audit trail, one entry per successful transition.
    pub transition_log: Vec<TransitionRecord>,
}

impl CaseRecord {
    /// Open a new case in `SUBMITTED` from a validated submission.
    pub fn open(
        subject_id: SubjectId,
        office_id: OfficeId,
        submission: CaseSubmission,
        submitted_at: Timestamp,
    ) -> Self {
        let kind = submission.kind();
        Self {
            id: CaseId::new(),
            subject_id,
            office_id,
            kind,
            status: CaseStatus::Submitted,
            submitted_at,
            verified_by: None,
            verified_at: None,
            approved_by: None,
            approved_at: None,
            rejected_reason: None,
            test_scheduled_at: None,
            test_result: None,
            assigned_number: None,
            terminated_at: None,
            details: submission.into(),
            transition_log: Vec::new(),
        }
    }

    /// Chassis number for vehicle cases, `None` for license cases.
    pub fn chassis_number(&self) -> Option<&str> {
        match &self.details {
            CaseDetails::Vehicle(v) => Some(&v.chassis_number),
            CaseDetails::License(_) => None,
        }
    }

    /// Move the case to `to`, appending an audit entry.
    ///
    /// The single gate every guarded method funnels through.
    fn transition(
        &mut self,
        to: CaseStatus,
        actor: &ActorId,
        at: Timestamp,
    ) -> Result<(), StateError> {
        if !self.status.can_transition(self.kind, to) {
            return Err(StateError::InvalidTransition {
                kind: self.kind,
                from: self.status,
                to,
            });
        }
        self.transition_log
            .push(TransitionRecord::new(self.status, to, actor.clone(), at));
        self.status = to;
        Ok(())
    }

    /// `SUBMITTED → DOC_VERIFIED`, recording the verifying officer.
    pub fn verify_documents(&mut self, verifier: &ActorId, at: Timestamp) -> Result<(), StateError> {
        self.transition(CaseStatus::DocVerified, verifier, at)?;
        self.verified_by = Some(verifier.clone());
        self.verified_at = Some(at);
        Ok(())
    }

    /// `SUBMITTED | DOC_VERIFIED → REJECTED`, recording the reason.
    pub fn reject(
        &mut self,
        actor: &ActorId,
        reason: impl Into<String>,
        at: Timestamp,
    ) -> Result<(), StateError> {
        self.transition(CaseStatus::Rejected, actor, at)?;
        self.rejected_reason = Some(reason.into());
        Ok(())
    }

    /// `DOC_VERIFIED | TEST_FAILED → TEST_SCHEDULED` (license only),
    /// recording the booked slot.
    pub fn schedule_test(
        &mut self,
        actor: &ActorId,
        date: Timestamp,
        at: Timestamp,
    ) -> Result<(), StateError> {
        self.transition(CaseStatus::TestScheduled, actor, at)?;
        self.test_scheduled_at = Some(date);
        Ok(())
    }

    /// `TEST_SCHEDULED → TEST_PASSED | TEST_FAILED` (license only).
    pub fn record_test_result(
        &mut self,
        actor: &ActorId,
        result: TestResult,
        at: Timestamp,
    ) -> Result<(), StateError> {
        self.transition(result.as_status(), actor, at)?;
        self.test_result = Some(result);
        Ok(())
    }

    /// `DOC_VERIFIED → APPROVED` (vehicle) or `TEST_PASSED → APPROVED`
    /// (license), recording the approver and the assigned number.
    pub fn approve(
        &mut self,
        approver: &ActorId,
        number: AssignedNumber,
        at: Timestamp,
    ) -> Result<(), StateError> {
        self.transition(CaseStatus::Approved, approver, at)?;
        self.assigned_number = Some(number);
        self.approved_by = Some(approver.clone());
        self.approved_at = Some(at);
        Ok(())
    }

    /// `APPROVED → SCRAPPED` (vehicle only), recording the scrap time.
    pub fn scrap(&mut self, actor: &ActorId, at: Timestamp) -> Result<(), StateError> {
        self.transition(CaseStatus::Scrapped, actor, at)?;
        self.terminated_at = Some(at);
        Ok(())
    }
}
