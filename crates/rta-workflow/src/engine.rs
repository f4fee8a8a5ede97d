//! # Workflow Engine
//!
//! Every operation follows the same shape: read the case, pre-check the
//! race rule, apply the guarded transition on the in-memory copy, and
//! persist through a conditional registry write that names the status the
//! engine read.
//!
//! ## Race Rule
//!
//! If the freshly read status is already the operation's target, the
//! caller lost a duplicate or a race and gets `Conflict`; any other
//! ineligible status is `InvalidTransition`. A conditional write that
//! misses (the record moved between read and write) is also `Conflict`.

use std::sync::Arc;

use rand_core::OsRng;
use rta_core::{ActorId, AssignedNumber, CaseId, CredentialId, OfficeId, SubjectId, Timestamp};
use rta_credential::{Credential, CredentialPayload, CredentialStatus, Issuer};
use rta_registry::Registry;
use rta_state::{CaseRecord, CaseStatus, CaseSubmission, TestResult};
use tracing::{debug, info};

use crate::error::{ConflictCause, WorkflowError};
use crate::events::{CaseEvent, NotificationSink};

/// Everything `approve` produces: the updated case, the issued
/// credential, and the payload to embed in the printed artifact.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// The case, now `APPROVED`.
    pub case: CaseRecord,
    /// The issued credential, `ACTIVE`.
    pub credential: Credential,
    /// The scannable payload.
    pub payload: CredentialPayload,
}

/// Orchestrates cases and credentials over a [`Registry`] and an
/// [`Issuer`].
pub struct WorkflowEngine<R: Registry> {
    registry: Arc<R>,
    issuer: Issuer,
    sink: Arc<dyn NotificationSink>,
}

impl<R: Registry> WorkflowEngine<R> {
    /// Create an engine.
    pub fn new(registry: Arc<R>, issuer: Issuer, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            registry,
            issuer,
            sink,
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// Open a new case from a validated submission.
    pub fn submit(
        &self,
        subject_id: SubjectId,
        office_id: OfficeId,
        submission: CaseSubmission,
    ) -> Result<CaseRecord, WorkflowError> {
        submission.validate()?;
        let case = CaseRecord::open(subject_id, office_id, submission, Timestamp::now());
        self.registry.insert_case(case.clone())?;
        info!(case_id = %case.id, kind = %case.kind, "case submitted");
        Ok(case)
    }

    /// Fetch a case.
    pub fn case(&self, case_id: CaseId) -> Result<CaseRecord, WorkflowError> {
        Ok(self.registry.case(case_id)?)
    }

    /// `SUBMITTED → DOC_VERIFIED`.
    pub fn verify_documents(
        &self,
        case_id: CaseId,
        verifier: &ActorId,
    ) -> Result<CaseRecord, WorkflowError> {
        self.guarded(case_id, CaseStatus::DocVerified, |case, at| {
            case.verify_documents(verifier, at)
        })
    }

    /// `SUBMITTED | DOC_VERIFIED → REJECTED`.
    pub fn reject(
        &self,
        case_id: CaseId,
        actor: &ActorId,
        reason: impl Into<String>,
    ) -> Result<CaseRecord, WorkflowError> {
        let reason = reason.into();
        let case = self.guarded(case_id, CaseStatus::Rejected, |case, at| {
            case.reject(actor, reason.clone(), at)
        })?;
        self.sink.notify(&CaseEvent::CaseRejected {
            case_id: case.id,
            reason,
        });
        Ok(case)
    }

    /// `DOC_VERIFIED | TEST_FAILED → TEST_SCHEDULED` (license only).
    pub fn schedule_test(
        &self,
        case_id: CaseId,
        actor: &ActorId,
        date: Timestamp,
    ) -> Result<CaseRecord, WorkflowError> {
        self.guarded(case_id, CaseStatus::TestScheduled, |case, at| {
            case.schedule_test(actor, date, at)
        })
    }

    /// `TEST_SCHEDULED → TEST_PASSED | TEST_FAILED` (license only).
    pub fn record_test_result(
        &self,
        case_id: CaseId,
        actor: &ActorId,
        result: TestResult,
    ) -> Result<CaseRecord, WorkflowError> {
        self.guarded(case_id, result.as_status(), |case, at| {
            case.record_test_result(actor, result, at)
        })
    }

    /// Approve a case and issue its credential atomically.
    ///
    /// With `Some(number)` the officer-supplied number is used; a
    /// collision surfaces as `Conflict` immediately. With `None` the
    /// engine mints numbers, retrying a bounded number of times on
    /// collision before giving up with
    /// [`ConflictCause::NumberSpaceExhausted`].
    pub fn approve(
        &self,
        case_id: CaseId,
        approver: &ActorId,
        assigned_number: Option<AssignedNumber>,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        if let Some(number) = assigned_number {
            return self.try_approve(case_id, approver, number);
        }
        for _ in 0..self.issuer.config().number_attempts {
            let kind = self.registry.case(case_id)?.kind;
            let minted =
                Issuer::generate_credential_number(kind.into(), Timestamp::now(), &mut OsRng);
            match self.try_approve(case_id, approver, minted) {
                // A minted number colliding is the one retry the engine
                // owns; everything else goes back to the caller.
                Err(WorkflowError::Conflict(ConflictCause::DuplicateNumber)) => continue,
                other => return other,
            }
        }
        Err(WorkflowError::Conflict(ConflictCause::NumberSpaceExhausted))
    }

    fn try_approve(
        &self,
        case_id: CaseId,
        approver: &ActorId,
        number: AssignedNumber,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        let mut case = self.registry.case(case_id)?;
        let prior = case.status;
        if prior == CaseStatus::Approved {
            return Err(WorkflowError::Conflict(ConflictCause::ConcurrentUpdate));
        }
        let now = Timestamp::now();
        case.approve(approver, number.clone(), now)
            .map_err(|e| WorkflowError::from_state(case_id, e))?;

        let credential = self.issuer.issue(&case, &number, now)?;
        let payload = self.issuer.payload_for(&credential, &case);

        // One atomic registry operation: case update + credential insert.
        self.registry
            .approve_case(prior, case.clone(), credential.clone())?;

        info!(
            case_id = %case.id,
            from = %prior,
            to = %case.status,
            number = %number,
            "case approved, credential issued"
        );
        self.sink.notify(&CaseEvent::CaseApproved {
            case_id: case.id,
            subject_id: case.subject_id,
            number: number.clone(),
        });
        self.sink.notify(&CaseEvent::CredentialIssued {
            credential_id: credential.id,
            credential_type: credential.credential_type,
            number,
        });

        Ok(ApprovalOutcome {
            case,
            credential,
            payload,
        })
    }

    /// Scrap a vehicle, revoking its credential atomically.
    pub fn scrap(
        &self,
        case_id: CaseId,
        actor: &ActorId,
    ) -> Result<CaseRecord, WorkflowError> {
        let mut case = self.registry.case(case_id)?;
        let prior = case.status;
        if prior == CaseStatus::Scrapped {
            return Err(WorkflowError::Conflict(ConflictCause::ConcurrentUpdate));
        }
        let now = Timestamp::now();
        case.scrap(actor, now)
            .map_err(|e| WorkflowError::from_state(case_id, e))?;

        let mut revoked = self.registry.credential_for_case(case_id)?;
        revoked.status = CredentialStatus::Revoked;
        let credential_id = revoked.id;

        self.registry.scrap_case(prior, case.clone(), revoked)?;

        info!(case_id = %case.id, from = %prior, to = %case.status, "vehicle scrapped");
        self.sink
            .notify(&CaseEvent::CaseScrapped { case_id: case.id });
        self.sink
            .notify(&CaseEvent::CredentialRevoked { credential_id });
        Ok(case)
    }

    /// Renew a credential: fresh expiry, fresh signature, same number.
    pub fn renew_credential(
        &self,
        credential_id: CredentialId,
    ) -> Result<Credential, WorkflowError> {
        let credential = self.registry.credential(credential_id)?;
        let renewed = self.issuer.renew(&credential, Timestamp::now())?;
        self.registry
            .update_credential(credential.status, renewed.clone())?;
        info!(credential_id = %credential_id, "credential renewed");
        self.sink.notify(&CaseEvent::CredentialRenewed {
            credential_id,
            expires_at: renewed.expires_at,
        });
        Ok(renewed)
    }

    /// Suspend an active credential.
    pub fn suspend_credential(
        &self,
        credential_id: CredentialId,
    ) -> Result<Credential, WorkflowError> {
        let credential = self.registry.credential(credential_id)?;
        if credential.status != CredentialStatus::Active {
            return Err(WorkflowError::InvalidCredentialState {
                credential_id,
                status: credential.status,
            });
        }
        let mut updated = credential;
        updated.status = CredentialStatus::Suspended;
        self.registry
            .update_credential(CredentialStatus::Active, updated.clone())?;
        info!(credential_id = %credential_id, "credential suspended");
        self.sink
            .notify(&CaseEvent::CredentialSuspended { credential_id });
        Ok(updated)
    }

    /// Reinstate a suspended credential.
    ///
    /// The registry re-checks subject uniqueness on the way back to
    /// `ACTIVE`.
    pub fn reinstate_credential(
        &self,
        credential_id: CredentialId,
    ) -> Result<Credential, WorkflowError> {
        let credential = self.registry.credential(credential_id)?;
        if credential.status != CredentialStatus::Suspended {
            return Err(WorkflowError::InvalidCredentialState {
                credential_id,
                status: credential.status,
            });
        }
        let mut updated = credential;
        updated.status = CredentialStatus::Active;
        self.registry
            .update_credential(CredentialStatus::Suspended, updated.clone())?;
        info!(credential_id = %credential_id, "credential reinstated");
        self.sink
            .notify(&CaseEvent::CredentialReinstated { credential_id });
        Ok(updated)
    }

    /// The shared read-guard-write shape for plain transitions.
    fn guarded(
        &self,
        case_id: CaseId,
        target: CaseStatus,
        apply: impl FnOnce(&mut CaseRecord, Timestamp) -> Result<(), rta_state::StateError>,
    ) -> Result<CaseRecord, WorkflowError> {
        let mut case = self.registry.case(case_id)?;
        let prior = case.status;
        if prior == target {
            return Err(WorkflowError::Conflict(ConflictCause::ConcurrentUpdate));
        }
        apply(&mut case, Timestamp::now())
            .map_err(|e| WorkflowError::from_state(case_id, e))?;
        self.registry.update_case(prior, case.clone())?;
        debug!(case_id = %case.id, from = %prior, to = %case.status, "case transitioned");
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use rta_credential::IssuerConfig;
    use rta_crypto::LocalKeyProvider;
    use rta_registry::InMemoryRegistry;
    use rta_state::{LicenseSubmission, VehicleSubmission};

    /// Records delivered events for assertions.
    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<CaseEvent>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, event: &CaseEvent) {
            self.events.lock().push(event.clone());
        }
    }

    struct Fixture {
        engine: WorkflowEngine<InMemoryRegistry>,
        sink: Arc<RecordingSink>,
    }

    fn fixture() -> Fixture {
        let sink = Arc::new(RecordingSink::default());
        let provider = Arc::new(LocalKeyProvider::from_seed([7u8; 32]));
        Fixture {
            engine: WorkflowEngine::new(
                Arc::new(InMemoryRegistry::new()),
                Issuer::new(provider, IssuerConfig::default()),
                sink.clone(),
            ),
            sink,
        }
    }

    fn officer() -> ActorId {
        ActorId::new("officer.rto:4412").unwrap()
    }

    fn vehicle_submission() -> CaseSubmission {
        CaseSubmission::Vehicle(VehicleSubmission {
            vehicle_type: "CAR".to_string(),
            make: "Tata".to_string(),
            model: "Nexon".to_string(),
            year: 2024,
            color: "Blue".to_string(),
            engine_number: "ENG12345".to_string(),
            chassis_number: "CHAS9988776655".to_string(),
            fuel_type: "PETROL".to_string(),
        })
    }

    fn license_submission() -> CaseSubmission {
        CaseSubmission::License(LicenseSubmission {
            license_type: "LMV".to_string(),
        })
    }

    fn office() -> OfficeId {
        OfficeId::new("MH12").unwrap()
    }

    #[test]
    fn submit_validates_before_storing() {
        let f = fixture();
        let mut bad = VehicleSubmission {
            vehicle_type: "CAR".to_string(),
            make: "Tata".to_string(),
            model: "Nexon".to_string(),
            year: 2024,
            color: "Blue".to_string(),
            engine_number: "ENG12345".to_string(),
            chassis_number: "CHAS9988776655".to_string(),
            fuel_type: "PETROL".to_string(),
        };
        bad.year = 1700;
        let result = f
            .engine
            .submit(SubjectId::new(), office(), CaseSubmission::Vehicle(bad));
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }

    #[test]
    fn vehicle_end_to_end() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        let outcome = f
            .engine
            .approve(
                case.id,
                &officer(),
                Some(AssignedNumber::new("MH12AB1234").unwrap()),
            )
            .unwrap();

        assert_eq!(outcome.case.status, CaseStatus::Approved);
        assert_eq!(outcome.credential.status, CredentialStatus::Active);
        assert_eq!(outcome.payload.number, "MH12AB1234");
        assert_eq!(
            outcome.payload.chassis_number.as_deref(),
            Some("CHAS9988776655")
        );

        let events = f.sink.events.lock();
        assert!(matches!(events[0], CaseEvent::CaseApproved { .. }));
        assert!(matches!(events[1], CaseEvent::CredentialIssued { .. }));
    }

    #[test]
    fn approve_mints_number_when_none_supplied() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        let outcome = f.engine.approve(case.id, &officer(), None).unwrap();
        assert!(outcome.payload.number.starts_with("RC-"));
        assert_eq!(
            outcome.case.assigned_number.as_ref().unwrap().as_str(),
            outcome.payload.number
        );
    }

    #[test]
    fn approve_without_verification_is_invalid_transition() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        let err = f
            .engine
            .approve(
                case.id,
                &officer(),
                Some(AssignedNumber::new("MH12AB1234").unwrap()),
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
        assert_eq!(
            f.engine.case(case.id).unwrap().status,
            CaseStatus::Submitted
        );
    }

    #[test]
    fn duplicate_approve_is_conflict() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        f.engine.approve(case.id, &officer(), None).unwrap();

        let err = f.engine.approve(case.id, &officer(), None).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Conflict(ConflictCause::ConcurrentUpdate)
        ));
    }

    #[test]
    fn supplied_number_collision_is_conflict_not_retried() {
        let f = fixture();
        let number = AssignedNumber::new("MH12AB1234").unwrap();

        let first = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(first.id, &officer()).unwrap();
        f.engine
            .approve(first.id, &officer(), Some(number.clone()))
            .unwrap();

        let second = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(second.id, &officer()).unwrap();
        let err = f
            .engine
            .approve(second.id, &officer(), Some(number))
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Conflict(ConflictCause::DuplicateNumber)
        ));
        // The loser's case is untouched and can be approved under a
        // different number.
        assert_eq!(
            f.engine.case(second.id).unwrap().status,
            CaseStatus::DocVerified
        );
    }

    #[test]
    fn license_end_to_end_with_retake() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), license_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        f.engine
            .schedule_test(case.id, &officer(), Timestamp::now())
            .unwrap();
        f.engine
            .record_test_result(case.id, &officer(), TestResult::Fail)
            .unwrap();
        f.engine
            .schedule_test(case.id, &officer(), Timestamp::now())
            .unwrap();
        f.engine
            .record_test_result(case.id, &officer(), TestResult::Pass)
            .unwrap();
        let outcome = f.engine.approve(case.id, &officer(), None).unwrap();

        assert!(outcome.payload.number.starts_with("DL-"));
        assert_eq!(
            outcome.payload.dl_no.as_deref(),
            Some(outcome.payload.number.as_str())
        );
        assert!(outcome.credential.expires_at.is_some());
    }

    #[test]
    fn schedule_test_on_vehicle_is_invalid_transition() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        let err = f
            .engine
            .schedule_test(case.id, &officer(), Timestamp::now())
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
    }

    #[test]
    fn reject_emits_event_with_reason() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine
            .reject(case.id, &officer(), "blurry documents")
            .unwrap();
        let events = f.sink.events.lock();
        assert!(matches!(
            &events[0],
            CaseEvent::CaseRejected { reason, .. } if reason == "blurry documents"
        ));
    }

    #[test]
    fn scrap_revokes_credential() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        let outcome = f.engine.approve(case.id, &officer(), None).unwrap();

        let scrapped = f.engine.scrap(case.id, &officer()).unwrap();
        assert_eq!(scrapped.status, CaseStatus::Scrapped);
        assert!(scrapped.terminated_at.is_some());
        assert_eq!(
            f.engine
                .registry()
                .credential(outcome.credential.id)
                .unwrap()
                .status,
            CredentialStatus::Revoked
        );
        // Second scrap is a lost duplicate.
        let err = f.engine.scrap(case.id, &officer()).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn suspend_and_reinstate_round_trip() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), license_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        f.engine
            .schedule_test(case.id, &officer(), Timestamp::now())
            .unwrap();
        f.engine
            .record_test_result(case.id, &officer(), TestResult::Pass)
            .unwrap();
        let outcome = f.engine.approve(case.id, &officer(), None).unwrap();
        let id = outcome.credential.id;

        let suspended = f.engine.suspend_credential(id).unwrap();
        assert_eq!(suspended.status, CredentialStatus::Suspended);

        // Suspending again is an invalid credential state, not a race.
        assert!(matches!(
            f.engine.suspend_credential(id).unwrap_err(),
            WorkflowError::InvalidCredentialState { .. }
        ));

        let reinstated = f.engine.reinstate_credential(id).unwrap();
        assert_eq!(reinstated.status, CredentialStatus::Active);
    }

    #[test]
    fn renew_license_credential() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), license_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        f.engine
            .schedule_test(case.id, &officer(), Timestamp::now())
            .unwrap();
        f.engine
            .record_test_result(case.id, &officer(), TestResult::Pass)
            .unwrap();
        let outcome = f.engine.approve(case.id, &officer(), None).unwrap();

        let renewed = f.engine.renew_credential(outcome.credential.id).unwrap();
        assert!(renewed.expires_at.unwrap() > outcome.credential.expires_at.unwrap());
        assert_eq!(
            renewed.credential_number,
            outcome.credential.credential_number
        );
        // The stored record is the renewed one.
        assert_eq!(
            f.engine
                .registry()
                .credential(outcome.credential.id)
                .unwrap()
                .signature,
            renewed.signature
        );
    }

    #[test]
    fn renew_vehicle_credential_is_not_renewable() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        let outcome = f.engine.approve(case.id, &officer(), None).unwrap();
        assert!(matches!(
            f.engine.renew_credential(outcome.credential.id).unwrap_err(),
            WorkflowError::NotRenewable(_)
        ));
    }

    /// Wraps the in-memory registry and fails the first `failures`
    /// approvals with a number collision.
    struct CollidingRegistry {
        inner: InMemoryRegistry,
        failures: std::sync::atomic::AtomicUsize,
    }

    impl CollidingRegistry {
        fn new(failures: usize) -> Self {
            Self {
                inner: InMemoryRegistry::new(),
                failures: std::sync::atomic::AtomicUsize::new(failures),
            }
        }
    }

    impl Registry for CollidingRegistry {
        fn insert_case(&self, case: CaseRecord) -> Result<(), rta_registry::RegistryError> {
            self.inner.insert_case(case)
        }

        fn case(&self, id: CaseId) -> Result<CaseRecord, rta_registry::RegistryError> {
            self.inner.case(id)
        }

        fn update_case(
            &self,
            expected: CaseStatus,
            updated: CaseRecord,
        ) -> Result<(), rta_registry::RegistryError> {
            self.inner.update_case(expected, updated)
        }

        fn approve_case(
            &self,
            expected: CaseStatus,
            updated: CaseRecord,
            credential: Credential,
        ) -> Result<(), rta_registry::RegistryError> {
            use std::sync::atomic::Ordering;
            if self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(rta_registry::RegistryError::DuplicateNumber {
                    credential_type: credential.credential_type,
                    number: credential.credential_number,
                });
            }
            self.inner.approve_case(expected, updated, credential)
        }

        fn scrap_case(
            &self,
            expected: CaseStatus,
            updated: CaseRecord,
            revoked: Credential,
        ) -> Result<(), rta_registry::RegistryError> {
            self.inner.scrap_case(expected, updated, revoked)
        }

        fn credential(
            &self,
            id: CredentialId,
        ) -> Result<Credential, rta_registry::RegistryError> {
            self.inner.credential(id)
        }

        fn credential_for_case(
            &self,
            case_id: CaseId,
        ) -> Result<Credential, rta_registry::RegistryError> {
            self.inner.credential_for_case(case_id)
        }

        fn credential_by_number(
            &self,
            credential_type: rta_core::CredentialType,
            number: &AssignedNumber,
        ) -> Result<Credential, rta_registry::RegistryError> {
            self.inner.credential_by_number(credential_type, number)
        }

        fn active_credential(
            &self,
            subject_id: SubjectId,
            credential_type: rta_core::CredentialType,
        ) -> Option<Credential> {
            self.inner.active_credential(subject_id, credential_type)
        }

        fn update_credential(
            &self,
            expected: CredentialStatus,
            updated: Credential,
        ) -> Result<(), rta_registry::RegistryError> {
            self.inner.update_credential(expected, updated)
        }
    }

    fn colliding_engine(failures: usize) -> WorkflowEngine<CollidingRegistry> {
        WorkflowEngine::new(
            Arc::new(CollidingRegistry::new(failures)),
            Issuer::new(
                Arc::new(LocalKeyProvider::from_seed([7u8; 32])),
                IssuerConfig::default(),
            ),
            Arc::new(crate::events::TracingSink),
        )
    }

    #[test]
    fn minted_number_collision_is_retried() {
        let engine = colliding_engine(2);
        let case = engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        engine.verify_documents(case.id, &officer()).unwrap();
        // Two collisions, then success on the third mint.
        let outcome = engine.approve(case.id, &officer(), None).unwrap();
        assert_eq!(outcome.case.status, CaseStatus::Approved);
    }

    #[test]
    fn minting_gives_up_after_bounded_attempts() {
        let attempts = IssuerConfig::default().number_attempts;
        let engine = colliding_engine(attempts as usize);
        let case = engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        engine.verify_documents(case.id, &officer()).unwrap();
        let err = engine.approve(case.id, &officer(), None).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Conflict(ConflictCause::NumberSpaceExhausted)
        ));
        // The case is untouched and approvable once the space clears.
        assert_eq!(
            engine.case(case.id).unwrap().status,
            CaseStatus::DocVerified
        );
        let outcome = engine.approve(case.id, &officer(), None).unwrap();
        assert_eq!(outcome.case.status, CaseStatus::Approved);
    }

    #[test]
    fn duplicate_verify_documents_is_conflict() {
        let f = fixture();
        let case = f
            .engine
            .submit(SubjectId::new(), office(), vehicle_submission())
            .unwrap();
        f.engine.verify_documents(case.id, &officer()).unwrap();
        let err = f.engine.verify_documents(case.id, &officer()).unwrap_err();
        assert!(err.is_retryable());
    }
}
