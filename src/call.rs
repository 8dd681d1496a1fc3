//! Cancellable execution of daemon calls.
//!
//! The RPC stubs have no native cancellation hook: once a request is on the
//! wire, the call runs until the daemon answers. Each call is therefore hosted
//! on its own task and raced against the caller's cancellation token.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, Result};

/// Run `call` to completion unless `cancel` fires first.
///
/// If the call completes first, its result is returned verbatim, success or
/// error. If the token fires first, [`ClientError::Canceled`] is returned
/// immediately and the hosting task is detached, not aborted: the in-flight
/// call runs to completion in the background and its eventual result is
/// discarded. Remote calls are expected to be short-lived, so the straggler
/// reclaims itself. No retries happen at this layer.
pub async fn run_unless_canceled<T, F>(cancel: &CancellationToken, call: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let call = tokio::spawn(call);
    tokio::select! {
        // Cancellation wins when both branches are ready at once.
        biased;
        _ = cancel.cancelled() => Err(ClientError::Canceled),
        joined = call => match joined {
            Ok(result) => result,
            Err(e) => Err(ClientError::Internal(format!("remote call task failed: {e}"))),
        },
    }
}
