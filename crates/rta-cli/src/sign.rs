//! # Sign and Verify Subcommands
//!
//! Detached signing over arbitrary JSON documents: the document is
//! canonicalized and HMAC-signed, and verification recomputes the digest
//! and compares in constant time. Useful for checking what a credential
//! payload would sign to, or for signing auxiliary artifacts with the
//! issuing key.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use rta_core::CanonicalBytes;
use rta_crypto::{compute_mac, MacSignature};

use crate::key::load_key;

/// Arguments for the sign subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// The key file to sign with.
    #[arg(long)]
    pub key: PathBuf,
    /// The JSON document to sign.
    pub doc: PathBuf,
}

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The key file to verify against.
    #[arg(long)]
    pub key: PathBuf,
    /// The claimed signature, 64 hex chars.
    #[arg(long)]
    pub signature: String,
    /// The JSON document to verify.
    pub doc: PathBuf,
}

fn canonicalize_doc(path: &Path) -> anyhow::Result<CanonicalBytes> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading document {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing document {}", path.display()))?;
    CanonicalBytes::from_value(value)
        .with_context(|| format!("canonicalizing document {}", path.display()))
}

/// Run the sign subcommand: print the signature hex.
pub fn run_sign(args: SignArgs) -> anyhow::Result<u8> {
    let key = load_key(&args.key)?;
    let canonical = canonicalize_doc(&args.doc)?;
    let signature = compute_mac(&key, &canonical);
    println!("{}", signature.to_hex());
    Ok(0)
}

/// Run the verify subcommand: exit 0 on a match, 1 on a mismatch.
pub fn run_verify(args: VerifyArgs) -> anyhow::Result<u8> {
    let key = load_key(&args.key)?;
    let claimed = MacSignature::from_hex(&args.signature).context("parsing --signature")?;
    let canonical = canonicalize_doc(&args.doc)?;
    let computed = compute_mac(&key, &canonical);
    if computed.ct_eq(&claimed) {
        println!("OK");
        Ok(0)
    } else {
        println!("MISMATCH");
        Ok(1)
    }
}
