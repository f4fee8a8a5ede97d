//! # Key Providers
//!
//! The [`KeyProvider`] trait is the custody seam: issuance and verification
//! code asks a provider to sign canonical bytes and never touches key
//! material directly. Swapping in an HSM-backed or remote-KMS provider
//! later means implementing this trait, nothing else changes.

use rta_core::CanonicalBytes;

use crate::error::CryptoError;
use crate::mac::{compute_mac, MacKey, MacSignature};

/// Environment variable holding the hex-encoded signing key.
pub const SIGNING_KEY_ENV: &str = "RTA_SIGNING_KEY_HEX";

/// A source of keyed-digest signatures over canonical bytes.
///
/// Implementations hold the key; callers hold only the trait object.
pub trait KeyProvider: Send + Sync {
    /// Sign canonical bytes, returning the HMAC-SHA256 signature.
    fn sign(&self, data: &CanonicalBytes) -> Result<MacSignature, CryptoError>;

    /// Short human-readable provider name for logs.
    fn provider_name(&self) -> &'static str;
}

/// A provider holding an in-process [`MacKey`].
///
/// Used by tests, the demo command, and deployments where the key is
/// injected at construction time.
pub struct LocalKeyProvider {
    key: MacKey,
}

impl LocalKeyProvider {
    /// Create a provider around an existing key.
    pub fn new(key: MacKey) -> Self {
        Self { key }
    }

    /// Create a provider with a freshly generated random key.
    ///
    /// Credentials signed under an ephemeral key cannot be verified after
    /// the process exits.
    pub fn generate() -> Self {
        Self {
            key: MacKey::generate(),
        }
    }

    /// Create a provider from a fixed 32-byte seed. Test use.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            key: MacKey::from_bytes(seed),
        }
    }
}

impl KeyProvider for LocalKeyProvider {
    fn sign(&self, data: &CanonicalBytes) -> Result<MacSignature, CryptoError> {
        Ok(compute_mac(&self.key, data))
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }
}

impl std::fmt::Debug for LocalKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LocalKeyProvider(<redacted>)")
    }
}

/// A provider that loads its key from the [`SIGNING_KEY_ENV`] environment
/// variable at construction time.
///
/// Construction fails fast when the variable is absent or malformed.
/// Issuance must never silently fall back to a default key.
pub struct EnvKeyProvider {
    key: MacKey,
}

impl EnvKeyProvider {
    /// Load the signing key from the environment.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::KeyMissing`] when the variable is unset
    /// - [`CryptoError::KeyInvalidHex`] / [`CryptoError::KeyInvalidLength`]
    ///   when the value does not decode to 32 bytes
    pub fn from_env() -> Result<Self, CryptoError> {
        let hex = std::env::var(SIGNING_KEY_ENV)
            .map_err(|_| CryptoError::KeyMissing(format!("{SIGNING_KEY_ENV} is not set")))?;
        let key = MacKey::from_hex(&hex)?;
        Ok(Self { key })
    }
}

impl KeyProvider for EnvKeyProvider {
    fn sign(&self, data: &CanonicalBytes) -> Result<MacSignature, CryptoError> {
        Ok(compute_mac(&self.key, data))
    }

    fn provider_name(&self) -> &'static str {
        "env"
    }
}

impl std::fmt::Debug for EnvKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EnvKeyProvider(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_provider_signs_deterministically() {
        let provider = LocalKeyProvider::from_seed([3u8; 32]);
        let data = CanonicalBytes::new(&json!({"number": "MH12AB1234"})).unwrap();
        let a = provider.sign(&data).unwrap();
        let b = provider.sign(&data).unwrap();
        assert!(a.ct_eq(&b));
    }

    #[test]
    fn test_same_seed_same_signature() {
        let data = CanonicalBytes::new(&json!({"x": 1})).unwrap();
        let a = LocalKeyProvider::from_seed([5u8; 32]).sign(&data).unwrap();
        let b = LocalKeyProvider::from_seed([5u8; 32]).sign(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_providers_differ() {
        let data = CanonicalBytes::new(&json!({"x": 1})).unwrap();
        let a = LocalKeyProvider::generate().sign(&data).unwrap();
        let b = LocalKeyProvider::generate().sign(&data).unwrap();
        assert!(!a.ct_eq(&b));
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(LocalKeyProvider::generate().provider_name(), "local");
    }

    #[test]
    fn test_debug_redacted() {
        let provider = LocalKeyProvider::generate();
        assert_eq!(format!("{provider:?}"), "LocalKeyProvider(<redacted>)");
    }

    // One test for all env states: the variable is process-global, so the
    // cases must not run in parallel.
    #[test]
    fn test_env_provider_load_states() {
        std::env::remove_var(SIGNING_KEY_ENV);
        assert!(matches!(
            EnvKeyProvider::from_env(),
            Err(CryptoError::KeyMissing(_))
        ));

        std::env::set_var(SIGNING_KEY_ENV, "not hex at all");
        assert!(matches!(
            EnvKeyProvider::from_env(),
            Err(CryptoError::KeyInvalidHex(_))
        ));

        std::env::set_var(SIGNING_KEY_ENV, "abcd");
        assert!(matches!(
            EnvKeyProvider::from_env(),
            Err(CryptoError::KeyInvalidLength { .. })
        ));

        std::env::set_var(SIGNING_KEY_ENV, "ab".repeat(32));
        let provider = EnvKeyProvider::from_env().unwrap();
        assert_eq!(provider.provider_name(), "env");

        // Signatures agree with a local provider holding the same key.
        let data = CanonicalBytes::new(&json!({"number": "MH12AB1234"})).unwrap();
        let local = LocalKeyProvider::new(MacKey::from_hex(&"ab".repeat(32)).unwrap());
        assert!(provider
            .sign(&data)
            .unwrap()
            .ct_eq(&local.sign(&data).unwrap()));

        std::env::remove_var(SIGNING_KEY_ENV);
    }
}
