//! Error types for the crypto layer.

use thiserror::Error;

/// Errors produced by key handling and digest computation.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The signing key could not be found where the provider expected it.
    #[error("signing key unavailable: {0}")]
    KeyMissing(String),

    /// Key material was present but not valid hex.
    #[error("signing key is not valid hex: {0}")]
    KeyInvalidHex(String),

    /// Key material decoded to the wrong number of bytes.
    #[error("signing key must be {expected} bytes, got {actual}")]
    KeyInvalidLength {
        /// Required key length in bytes.
        expected: usize,
        /// Length actually provided.
        actual: usize,
    },

    /// A signature string failed hex decoding or had the wrong length.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
}
