//! # HMAC-SHA256 Keyed Digests
//!
//! Key material and signature types, plus the single digest function
//! [`compute_mac`] used by both issuance and verification.
//!
//! ## Security Invariant
//!
//! - [`compute_mac`] takes `&CanonicalBytes` — you cannot digest raw bytes.
//! - [`MacKey`] zeroizes on drop and does not implement `Serialize`; its
//!   `Debug` output is redacted.
//! - Signature equality for verification goes through [`MacSignature::ct_eq`],
//!   which is constant-time.

use hmac::{Hmac, Mac};
use rand_core::{OsRng, RngCore};
use rta_core::CanonicalBytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Required key length in bytes.
pub const KEY_LEN: usize = 32;

/// Signature length in bytes (SHA-256 output).
pub const SIGNATURE_LEN: usize = 32;

/// A 32-byte HMAC-SHA256 key.
///
/// Zeroizes on drop. Does not implement `Serialize` — key material must
/// not be accidentally serialized into logs, responses, or artifacts.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MacKey([u8; KEY_LEN]);

/// An HMAC-SHA256 signature (32 bytes).
///
/// Serializes as a 64-character lowercase hex string, the form embedded
/// in scannable credential payloads.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MacSignature([u8; SIGNATURE_LEN]);

// ---------------------------------------------------------------------------
// MacKey impls
// ---------------------------------------------------------------------------

impl MacKey {
    /// Create a key from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate a new random key from the OS entropy source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parse a key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim().to_lowercase();
        let bytes = hex_to_bytes(&hex).map_err(CryptoError::KeyInvalidHex)?;
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::KeyInvalidLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Render the key as a lowercase hex string.
    ///
    /// For key distribution tooling only. The returned string is not
    /// zeroized; callers that persist it own its handling.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Access the raw key bytes.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for MacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MacKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// MacSignature impls
// ---------------------------------------------------------------------------

impl MacSignature {
    /// Create a signature from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte signature.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Render the signature as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a signature from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != SIGNATURE_LEN * 2 {
            return Err(CryptoError::MalformedSignature(format!(
                "signature hex must be {} chars, got {}",
                SIGNATURE_LEN * 2,
                hex.len()
            )));
        }
        let bytes = hex_to_bytes(&hex).map_err(CryptoError::MalformedSignature)?;
        let mut arr = [0u8; SIGNATURE_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Constant-time equality comparison.
    ///
    /// Verification must use this rather than `==` so that comparison
    /// timing reveals nothing about how many leading bytes matched.
    pub fn ct_eq(&self, other: &MacSignature) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Serialize for MacSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for MacSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for MacSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "MacSignature({prefix}...)")
    }
}

impl std::fmt::Display for MacSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Digest computation
// ---------------------------------------------------------------------------

/// Compute the HMAC-SHA256 digest of canonical bytes under the given key.
///
/// The input type is `&CanonicalBytes`, enforcing at compile time that only
/// canonicalized data can be signed.
pub fn compute_mac(key: &MacKey, data: &CanonicalBytes) -> MacSignature {
    // HMAC accepts keys of any length; new_from_slice cannot fail here.
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(data.as_bytes());
    let digest = mac.finalize().into_bytes();
    let mut arr = [0u8; SIGNATURE_LEN];
    arr.copy_from_slice(&digest);
    MacSignature(arr)
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical(value: &serde_json::Value) -> CanonicalBytes {
        CanonicalBytes::new(value).expect("should canonicalize")
    }

    #[test]
    fn test_mac_deterministic() {
        let key = MacKey::from_bytes([7u8; 32]);
        let data = canonical(&json!({"number": "MH12AB1234", "type": "VEHICLE"}));
        let a = compute_mac(&key, &data);
        let b = compute_mac(&key, &data);
        assert_eq!(a, b);
    }

    #[test]
    fn test_mac_differs_across_keys() {
        let data = canonical(&json!({"number": "MH12AB1234"}));
        let a = compute_mac(&MacKey::from_bytes([1u8; 32]), &data);
        let b = compute_mac(&MacKey::from_bytes([2u8; 32]), &data);
        assert!(!a.ct_eq(&b));
    }

    #[test]
    fn test_mac_differs_across_messages() {
        let key = MacKey::from_bytes([7u8; 32]);
        let a = compute_mac(&key, &canonical(&json!({"number": "MH12AB1234"})));
        let b = compute_mac(&key, &canonical(&json!({"number": "MH12AB1235"})));
        assert!(!a.ct_eq(&b));
    }

    #[test]
    fn test_key_hex_roundtrip() {
        let key = MacKey::generate();
        let hex = key.to_hex();
        assert_eq!(hex.len(), 64);
        let restored = MacKey::from_hex(&hex).unwrap();
        assert_eq!(key.as_bytes(), restored.as_bytes());
    }

    #[test]
    fn test_key_invalid_hex() {
        assert!(MacKey::from_hex("not-hex").is_err());
        assert!(MacKey::from_hex("aabb").is_err());
        assert!(MacKey::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_key_wrong_length() {
        let result = MacKey::from_hex(&"ab".repeat(16));
        assert!(matches!(
            result,
            Err(CryptoError::KeyInvalidLength {
                expected: 32,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let key = MacKey::from_bytes([9u8; 32]);
        let sig = compute_mac(&key, &canonical(&json!({"x": 1})));
        let hex = sig.to_hex();
        assert_eq!(hex.len(), 64);
        let restored = MacSignature::from_hex(&hex).unwrap();
        assert!(sig.ct_eq(&restored));
    }

    #[test]
    fn test_signature_serde_roundtrip() {
        let key = MacKey::from_bytes([9u8; 32]);
        let sig = compute_mac(&key, &canonical(&json!({"x": 1})));
        let json = serde_json::to_string(&sig).unwrap();
        assert!(json.starts_with('"'));
        assert_eq!(json.len(), 64 + 2); // 64 hex chars + 2 quotes
        let restored: MacSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, restored);
    }

    #[test]
    fn test_signature_invalid_hex() {
        assert!(MacSignature::from_hex("not-hex").is_err());
        assert!(MacSignature::from_hex("aabb").is_err());
        assert!(MacSignature::from_hex(&"ab".repeat(33)).is_err());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = MacKey::generate();
        assert_eq!(format!("{key:?}"), "MacKey(<redacted>)");
    }

    #[test]
    fn test_debug_signature_shows_prefix() {
        let key = MacKey::from_bytes([0u8; 32]);
        let sig = compute_mac(&key, &canonical(&json!({"x": 1})));
        let debug = format!("{sig:?}");
        assert!(debug.starts_with("MacSignature("));
        assert!(debug.ends_with("...)"));
    }
}
