//! # Demo Subcommand
//!
//! Self-contained end-to-end walkthrough against an in-memory registry:
//! submit a vehicle registration and a license application, drive both to
//! approval, print the scannable payloads, then verify them — including
//! one deliberately tampered scan.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rta_core::{ActorId, OfficeId, SubjectId, Timestamp};
use rta_credential::{Issuer, IssuerConfig, Verifier};
use rta_crypto::LocalKeyProvider;
use rta_registry::InMemoryRegistry;
use rta_state::{CaseSubmission, LicenseSubmission, TestResult, VehicleSubmission};
use rta_workflow::{TracingSink, WorkflowEngine};
use tracing::warn;

/// Arguments for the demo subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Optional issuer configuration file (YAML).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<IssuerConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(IssuerConfig::default()),
    }
}

/// Run the demo subcommand.
pub fn run(args: DemoArgs) -> anyhow::Result<u8> {
    let config = load_config(args.config.as_deref())?;
    warn!("demo uses an ephemeral signing key; payloads will not verify after exit");

    let provider = Arc::new(LocalKeyProvider::generate());
    let registry = Arc::new(InMemoryRegistry::new());
    let engine = WorkflowEngine::new(
        registry.clone(),
        Issuer::new(provider.clone(), config),
        Arc::new(TracingSink),
    );
    let verifier = Verifier::new(provider);
    let officer = ActorId::new("officer.rto:demo")?;
    let office = OfficeId::new("MH12")?;

    // Vehicle registration, end to end.
    println!("== vehicle registration ==");
    let case = engine.submit(
        SubjectId::new(),
        office.clone(),
        CaseSubmission::Vehicle(VehicleSubmission {
            vehicle_type: "CAR".to_string(),
            make: "Tata".to_string(),
            model: "Nexon".to_string(),
            year: 2024,
            color: "Blue".to_string(),
            engine_number: "ENG12345".to_string(),
            chassis_number: "CHAS9988776655".to_string(),
            fuel_type: "PETROL".to_string(),
        }),
    )?;
    println!("submitted case {}", case.id);
    engine.verify_documents(case.id, &officer)?;
    let vehicle = engine.approve(case.id, &officer, None)?;
    let vehicle_payload = vehicle.payload.to_json()?;
    println!("issued {}", vehicle.credential.credential_number);
    println!("payload: {vehicle_payload}");

    // License application, with a failed test and a retake.
    println!("== driving license ==");
    let case = engine.submit(
        SubjectId::new(),
        office,
        CaseSubmission::License(LicenseSubmission {
            license_type: "LMV".to_string(),
        }),
    )?;
    println!("submitted case {}", case.id);
    engine.verify_documents(case.id, &officer)?;
    engine.schedule_test(case.id, &officer, Timestamp::now())?;
    engine.record_test_result(case.id, &officer, TestResult::Fail)?;
    println!("test failed, scheduling retake");
    engine.schedule_test(case.id, &officer, Timestamp::now())?;
    engine.record_test_result(case.id, &officer, TestResult::Pass)?;
    let license = engine.approve(case.id, &officer, None)?;
    let license_payload = license.payload.to_json()?;
    println!("issued {}", license.credential.credential_number);
    println!("payload: {license_payload}");

    // Checkpoint scans.
    println!("== verification ==");
    let now = Timestamp::now();
    println!(
        "vehicle scan:  {}",
        verifier.verify_json(&vehicle_payload, registry.as_ref(), now)
    );
    println!(
        "license scan:  {}",
        verifier.verify_json(&license_payload, registry.as_ref(), now)
    );
    let tampered = vehicle_payload.replace("CHAS9988776655", "CHAS0000000000");
    println!(
        "tampered scan: {}",
        verifier.verify_json(&tampered, registry.as_ref(), now)
    );

    Ok(0)
}
