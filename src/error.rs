//! Crate-wide error and result types.

use thiserror::Error;

/// Errors surfaced by custodian client operations.
///
/// Remote failures are opaque here: the daemon's error text is carried through
/// untouched so callers can apply their own policy. Cancellation is a distinct
/// variant so "the operation didn't happen" is distinguishable from "the
/// operation failed".
#[derive(Debug, Error)]
pub enum ClientError {
    /// The daemon (or the transport beneath the service stub) reported a
    /// failure. Propagated verbatim; never produced locally.
    #[error("remote call failed: {0}")]
    Remote(String),

    /// The caller's cancellation token fired before the remote call returned.
    #[error("call canceled before the daemon responded")]
    Canceled,

    /// A key identifier returned by the daemon failed structural validation.
    /// Carries the offending identifier, base64-url encoded.
    #[error("invalid key identifier: {0}")]
    InvalidKeyFormat(String),

    /// The task hosting a remote call could not run to completion.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// True when the error means the operation was canceled rather than
    /// attempted and failed.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
