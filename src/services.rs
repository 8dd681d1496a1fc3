//! Remote service interfaces exposed by the custodian daemon.
//!
//! Each trait is a thin stub contract over one independently-versioned daemon
//! service. The surrounding transport code owns stub construction and the
//! socket beneath it; this crate only requires the contracts, so tests (and
//! alternative transports) can inject in-memory doubles.
//!
//! The records here mirror the daemon's wire schema. Domain-shaped results
//! live in [`crate::types`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::keys::RawPublicKey;
use crate::types::UserId;

/// Integer handle identifying which local session a session-scoped call
/// applies to.
pub type SessionSlot = i32;

/// Request for an identity-assertion lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyArg {
    pub user_assertion: String,
}

/// User record inside an identify response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub uid: UserId,
}

/// Response to an identity-assertion lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyRes {
    pub user: UserRecord,
    pub public_keys: Vec<RawPublicKey>,
}

/// Request for a user-plus-keys bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadUserPlusKeysArg {
    pub uid: UserId,
    /// Whether daemon-cached data is acceptable.
    pub cache_ok: bool,
}

/// A user together with their current device keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlusKeys {
    pub username: String,
    pub uid: UserId,
    pub device_keys: Vec<RawPublicKey>,
}

/// Session record as the daemon reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub uid: UserId,
    /// Opaque session token.
    pub token: String,
    /// The device's encryption key. Always treated as a crypt key; the
    /// signing flag on this descriptor is not consulted.
    pub device_key: RawPublicKey,
}

/// A favorite/shared folder reference. Owned by the daemon; relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    /// Visibility flag: true for privately shared folders.
    pub private: bool,
}

/// Request to record a folder as a favorite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAddArg {
    pub folder: Folder,
}

/// Request to drop a folder from the favorites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteDeleteArg {
    pub folder: Folder,
}

/// Identity lookups.
#[async_trait]
pub trait IdentifyService: Send + Sync {
    async fn identify(&self, arg: IdentifyArg) -> Result<IdentifyRes>;
}

/// Session-scoped queries.
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn current_uid(&self, session: SessionSlot) -> Result<UserId>;
    async fn current_session(&self, session: SessionSlot) -> Result<SessionRecord>;
}

/// Favorites mutations and queries.
#[async_trait]
pub trait FavoriteService: Send + Sync {
    async fn favorite_add(&self, arg: FavoriteAddArg) -> Result<()>;
    async fn favorite_delete(&self, arg: FavoriteDeleteArg) -> Result<()>;
    async fn favorite_list(&self, session: SessionSlot) -> Result<Vec<Folder>>;
}

/// User loads.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn load_user_plus_keys(&self, arg: LoadUserPlusKeysArg) -> Result<UserPlusKeys>;
}
