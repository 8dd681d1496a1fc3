//! Domain-shaped results handed back to callers.
//!
//! Deliberately decoupled from the wire records in [`crate::services`]: the
//! daemon's schema can evolve without disturbing callers. Everything here is
//! an immutable value type owned by the caller once returned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keys::{CryptPublicKey, VerifyingKey};

/// Unique, stable identifier the daemon assigns a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username normalized for case-insensitive comparison.
///
/// The canonical form is lowercase, so derived equality already compares
/// case-insensitively for anything built through [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Normalize a daemon-reported username.
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved identity of a remote user, with their keys already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub name: Username,
    pub uid: UserId,
    /// Keys usable only to verify signatures, in daemon-reported order.
    pub verifying_keys: Vec<VerifyingKey>,
    /// Keys usable only for encryption, in daemon-reported order.
    pub crypt_public_keys: Vec<CryptPublicKey>,
}

/// The caller's authenticated session, as known to the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub uid: UserId,
    /// Opaque session token.
    pub token: String,
    /// The device's own encryption key.
    pub crypt_public_key: CryptPublicKey,
}
