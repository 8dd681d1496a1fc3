//! The custodian daemon façade.
//!
//! [`CustodianClient`] implements the stable capability interface over four
//! injected service stubs. Every operation follows the same shape: build the
//! wire request, run the remote call under the caller's cancellation token,
//! reshape the response into domain types. The client holds no state between
//! calls beyond the stubs themselves, which are shared read-only for its
//! whole lifetime.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::call::run_unless_canceled;
use crate::error::Result;
use crate::keys::{classify_keys, CryptPublicKey, KeyId};
use crate::services::{
    FavoriteAddArg, FavoriteDeleteArg, FavoriteService, Folder, IdentifyArg, IdentifyService,
    LoadUserPlusKeysArg, SessionService, SessionSlot, UserService,
};
use crate::types::{SessionInfo, UserId, UserInfo, Username};

/// Stable capability interface to the custodian daemon.
///
/// Every operation takes the caller's cancellation token first and returns a
/// typed result or a [`crate::ClientError`]. Remote errors propagate
/// unchanged; cancellation surfaces as `Canceled`; nothing is retried here.
#[async_trait]
pub trait Custodian: Send + Sync {
    /// Resolve an identity assertion to a user and their classified keys.
    async fn identify(&self, cancel: &CancellationToken, assertion: &str) -> Result<UserInfo>;

    /// Load a user and their keys, allowing daemon-cached data.
    async fn load_user_plus_keys(
        &self,
        cancel: &CancellationToken,
        uid: UserId,
    ) -> Result<UserInfo>;

    /// Resolve the active user identifier for a session slot.
    async fn current_uid(&self, cancel: &CancellationToken, session: SessionSlot)
        -> Result<UserId>;

    /// Resolve the current session, including the device's crypt key.
    async fn current_session(
        &self,
        cancel: &CancellationToken,
        session: SessionSlot,
    ) -> Result<SessionInfo>;

    /// Record a folder as a favorite.
    async fn favorite_add(&self, cancel: &CancellationToken, folder: Folder) -> Result<()>;

    /// Drop a folder from the favorites.
    async fn favorite_delete(&self, cancel: &CancellationToken, folder: Folder) -> Result<()>;

    /// List favorites in the order the daemon reports them.
    async fn favorite_list(
        &self,
        cancel: &CancellationToken,
        session: SessionSlot,
    ) -> Result<Vec<Folder>>;

    /// Release client-held resources.
    fn shutdown(&self);
}

/// RPC-backed implementation of [`Custodian`].
#[derive(Clone)]
pub struct CustodianClient {
    identify: Arc<dyn IdentifyService>,
    session: Arc<dyn SessionService>,
    favorite: Arc<dyn FavoriteService>,
    user: Arc<dyn UserService>,
}

impl CustodianClient {
    /// Build a client from the four service stubs.
    ///
    /// Accepts network-backed stubs or in-memory doubles alike; the stubs and
    /// the transport beneath them stay owned by the caller.
    pub fn new(
        identify: Arc<dyn IdentifyService>,
        session: Arc<dyn SessionService>,
        favorite: Arc<dyn FavoriteService>,
        user: Arc<dyn UserService>,
    ) -> Self {
        Self {
            identify,
            session,
            favorite,
            user,
        }
    }
}

#[async_trait]
impl Custodian for CustodianClient {
    async fn identify(&self, cancel: &CancellationToken, assertion: &str) -> Result<UserInfo> {
        let arg = IdentifyArg {
            user_assertion: assertion.to_string(),
        };
        let stub = Arc::clone(&self.identify);
        let res = run_unless_canceled(cancel, async move { stub.identify(arg).await }).await?;

        let name = Username::new(&res.user.username);
        let uid = res.user.uid;
        let (verifying_keys, crypt_public_keys) = classify_keys(&uid, &res.public_keys)?;

        Ok(UserInfo {
            name,
            uid,
            verifying_keys,
            crypt_public_keys,
        })
    }

    async fn load_user_plus_keys(
        &self,
        cancel: &CancellationToken,
        uid: UserId,
    ) -> Result<UserInfo> {
        let arg = LoadUserPlusKeysArg {
            uid,
            cache_ok: true,
        };
        let stub = Arc::clone(&self.user);
        let res =
            run_unless_canceled(cancel, async move { stub.load_user_plus_keys(arg).await }).await?;

        let (verifying_keys, crypt_public_keys) = classify_keys(&res.uid, &res.device_keys)?;

        Ok(UserInfo {
            name: Username::new(&res.username),
            uid: res.uid,
            verifying_keys,
            crypt_public_keys,
        })
    }

    async fn current_uid(
        &self,
        cancel: &CancellationToken,
        session: SessionSlot,
    ) -> Result<UserId> {
        let stub = Arc::clone(&self.session);
        run_unless_canceled(cancel, async move { stub.current_uid(session).await }).await
    }

    async fn current_session(
        &self,
        cancel: &CancellationToken,
        session: SessionSlot,
    ) -> Result<SessionInfo> {
        let stub = Arc::clone(&self.session);
        let res = run_unless_canceled(cancel, async move { stub.current_session(session).await })
            .await?;

        // A single descriptor here, not a batch; validate before trusting.
        let kid = KeyId::from_bytes(&res.device_key.kid)?;
        debug!(key = %kid, "got device crypt public key");

        Ok(SessionInfo {
            uid: res.uid,
            token: res.token,
            crypt_public_key: CryptPublicKey { kid },
        })
    }

    async fn favorite_add(&self, cancel: &CancellationToken, folder: Folder) -> Result<()> {
        let arg = FavoriteAddArg { folder };
        let stub = Arc::clone(&self.favorite);
        run_unless_canceled(cancel, async move { stub.favorite_add(arg).await }).await
    }

    async fn favorite_delete(&self, cancel: &CancellationToken, folder: Folder) -> Result<()> {
        let arg = FavoriteDeleteArg { folder };
        let stub = Arc::clone(&self.favorite);
        run_unless_canceled(cancel, async move { stub.favorite_delete(arg).await }).await
    }

    async fn favorite_list(
        &self,
        cancel: &CancellationToken,
        session: SessionSlot,
    ) -> Result<Vec<Folder>> {
        let stub = Arc::clone(&self.favorite);
        run_unless_canceled(cancel, async move { stub.favorite_list(session).await }).await
    }

    fn shutdown(&self) {
        // The stubs and their transport belong to whoever constructed us;
        // nothing to tear down here.
    }
}
