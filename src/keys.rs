//! Key material returned by the custodian daemon.
//!
//! The daemon hands back raw key descriptors over the wire; nothing in them is
//! trusted until the identifier passes structural validation here. Valid
//! identifiers are classified into the two roles callers work with: verifying
//! keys (signature checks) and crypt public keys (encryption).

use std::fmt;

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::types::UserId;

/// Length in bytes of a well-formed key identifier.
pub const KEY_ID_LEN: usize = 39;

/// Format prefix every key identifier must carry.
pub const KEY_ID_PREFIX: [u8; 3] = [0x84, 0x20, 0x24];

/// Validated key identifier: format prefix, 32-byte key core, 4-byte location
/// suffix. The core stays opaque to this crate.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyId(Vec<u8>);

impl KeyId {
    /// Structurally validate raw identifier bytes.
    ///
    /// Checks length and format prefix only. Failure carries the offending
    /// identifier so the daemon-side key can be tracked down.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_ID_LEN || bytes[..KEY_ID_PREFIX.len()] != KEY_ID_PREFIX {
            return Err(ClientError::InvalidKeyFormat(encode_raw(bytes)));
        }
        Ok(Self(bytes.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode as base64 URL-safe string
    pub fn to_base64(&self) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(&self.0)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({}...)", &self.to_base64()[..8])
    }
}

/// Encode arbitrary identifier bytes for an error message.
fn encode_raw(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        "<empty>".to_string()
    } else {
        BASE64_URL_SAFE_NO_PAD.encode(bytes)
    }
}

/// A public key usable only to verify signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerifyingKey {
    pub kid: KeyId,
}

/// A public key usable only to encrypt data for its holder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CryptPublicKey {
    pub kid: KeyId,
}

/// Raw key descriptor as received from the daemon. Untrusted until classified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPublicKey {
    /// Opaque identifier bytes; validated during classification.
    pub kid: Vec<u8>,
    /// True when the key's role is signing/verification.
    pub is_signing_key: bool,
    /// Marker for the deprecated fingerprint-addressed key format.
    #[serde(default)]
    pub legacy_fingerprint: Option<Vec<u8>>,
}

/// Split raw descriptors into verifying keys and crypt public keys,
/// preserving daemon-reported order within each role.
///
/// Descriptors carrying a non-empty legacy fingerprint are skipped outright;
/// the deprecated format is not supported on this interface. A structurally
/// invalid identifier fails the whole batch - partial lists are never
/// returned.
pub fn classify_keys(
    uid: &UserId,
    keys: &[RawPublicKey],
) -> Result<(Vec<VerifyingKey>, Vec<CryptPublicKey>)> {
    let mut verifying_keys = Vec::new();
    let mut crypt_public_keys = Vec::new();
    for raw in keys {
        if raw
            .legacy_fingerprint
            .as_ref()
            .is_some_and(|fp| !fp.is_empty())
        {
            continue;
        }
        let kid = KeyId::from_bytes(&raw.kid)?;
        if raw.is_signing_key {
            debug!(key = %kid, user = %uid, "got verifying key");
            verifying_keys.push(VerifyingKey { kid });
        } else {
            debug!(key = %kid, user = %uid, "got crypt public key");
            crypt_public_keys.push(CryptPublicKey { kid });
        }
    }
    Ok((verifying_keys, crypt_public_keys))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a well-formed identifier whose key core is filled with `seed`.
    fn valid_kid(seed: u8) -> Vec<u8> {
        let mut bytes = KEY_ID_PREFIX.to_vec();
        bytes.extend_from_slice(&[seed; 32]);
        bytes.extend_from_slice(&[0u8; 4]);
        bytes
    }

    fn raw_key(seed: u8, is_signing_key: bool) -> RawPublicKey {
        RawPublicKey {
            kid: valid_kid(seed),
            is_signing_key,
            legacy_fingerprint: None,
        }
    }

    #[test]
    fn test_key_id_accepts_well_formed_bytes() {
        let kid = KeyId::from_bytes(&valid_kid(7)).unwrap();
        assert_eq!(kid.as_bytes().len(), KEY_ID_LEN);
        assert_eq!(kid.as_bytes()[..3], KEY_ID_PREFIX);
    }

    #[test]
    fn test_key_id_rejects_bad_length_and_prefix() {
        assert!(matches!(
            KeyId::from_bytes(&[0u8; 10]),
            Err(ClientError::InvalidKeyFormat(_))
        ));

        let mut wrong_prefix = valid_kid(1);
        wrong_prefix[0] = 0x00;
        assert!(matches!(
            KeyId::from_bytes(&wrong_prefix),
            Err(ClientError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn test_key_id_rejects_empty_with_marker() {
        match KeyId::from_bytes(&[]) {
            Err(ClientError::InvalidKeyFormat(raw)) => assert_eq!(raw, "<empty>"),
            other => panic!("expected InvalidKeyFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_preserves_order_within_role() {
        let uid = UserId::new("u1");
        let keys = vec![
            raw_key(1, true),
            raw_key(2, false),
            raw_key(3, true),
            raw_key(4, false),
        ];

        let (verifying, crypt) = classify_keys(&uid, &keys).unwrap();
        let v: Vec<u8> = verifying.iter().map(|k| k.kid.as_bytes()[3]).collect();
        let c: Vec<u8> = crypt.iter().map(|k| k.kid.as_bytes()[3]).collect();
        assert_eq!(v, vec![1, 3]);
        assert_eq!(c, vec![2, 4]);
    }

    #[test]
    fn test_classify_skips_legacy_fingerprint_keys() {
        let uid = UserId::new("u1");
        let mut legacy = raw_key(9, true);
        legacy.legacy_fingerprint = Some(vec![0xde, 0xad]);
        // An invalid identifier under a legacy marker must not trip validation.
        legacy.kid = vec![0u8; 4];

        let keys = vec![raw_key(1, true), legacy, raw_key(2, false)];
        let (verifying, crypt) = classify_keys(&uid, &keys).unwrap();
        assert_eq!(verifying.len(), 1);
        assert_eq!(crypt.len(), 1);
    }

    #[test]
    fn test_classify_treats_empty_fingerprint_as_absent() {
        let uid = UserId::new("u1");
        let mut key = raw_key(5, false);
        key.legacy_fingerprint = Some(Vec::new());

        let (verifying, crypt) = classify_keys(&uid, &[key]).unwrap();
        assert!(verifying.is_empty());
        assert_eq!(crypt.len(), 1);
    }

    #[test]
    fn test_classify_invalid_key_aborts_whole_batch() {
        let uid = UserId::new("u1");
        let bad = RawPublicKey {
            kid: vec![1, 2, 3],
            is_signing_key: false,
            legacy_fingerprint: None,
        };
        let keys = vec![raw_key(1, true), bad, raw_key(2, false)];

        assert!(matches!(
            classify_keys(&uid, &keys),
            Err(ClientError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn test_key_id_debug_truncates() {
        let kid = KeyId::from_bytes(&valid_kid(0)).unwrap();
        let debug = format!("{kid:?}");
        assert!(debug.starts_with("KeyId("));
        assert!(debug.ends_with("...)"));
    }
}
