//! Error types for the credential layer.

use rta_core::{CanonicalizationError, CredentialId};
use rta_crypto::CryptoError;
use thiserror::Error;

use crate::credential::CredentialStatus;

/// Errors produced by issuance and renewal.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The case is not in a state from which a credential can be built.
    #[error("case is not approvable: {0}")]
    CaseNotApprovable(String),

    /// Renewal or suspension attempted from an ineligible credential status.
    #[error("credential {credential_id} is {status}, operation not allowed")]
    InvalidCredentialState {
        /// The credential in question.
        credential_id: CredentialId,
        /// Its current status.
        status: CredentialStatus,
    },

    /// Renewal attempted on an open-ended credential.
    #[error("credential {0} has no expiry and is not renewable")]
    NotRenewable(CredentialId),

    /// The signing input could not be canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    /// The key provider failed to sign.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
