//! # Key Subcommand
//!
//! Generates and inspects signing key files. A key file holds one line:
//! 64 lowercase hex characters.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use rta_crypto::MacKey;

/// Arguments for the key subcommand.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Key operation to perform.
    #[command(subcommand)]
    pub command: KeyCommand,
}

/// Key operations.
#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// Generate a new random signing key and write it to a file.
    Generate {
        /// Where to write the hex-encoded key.
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the hex-encoded key from a key file.
    Show {
        /// The key file to read.
        #[arg(long)]
        key: PathBuf,
    },
}

/// Read and validate a key file.
pub fn load_key(path: &Path) -> anyhow::Result<MacKey> {
    let hex = std::fs::read_to_string(path)
        .with_context(|| format!("reading key file {}", path.display()))?;
    MacKey::from_hex(&hex).with_context(|| format!("parsing key file {}", path.display()))
}

/// Run the key subcommand.
pub fn run(args: KeyArgs) -> anyhow::Result<u8> {
    match args.command {
        KeyCommand::Generate { out } => {
            if out.exists() {
                anyhow::bail!("refusing to overwrite existing key file {}", out.display());
            }
            let key = MacKey::generate();
            std::fs::write(&out, format!("{}\n", key.to_hex()))
                .with_context(|| format!("writing key file {}", out.display()))?;
            println!("wrote signing key to {}", out.display());
            Ok(0)
        }
        KeyCommand::Show { key } => {
            let key = load_key(&key)?;
            println!("{}", key.to_hex());
            Ok(0)
        }
    }
}
