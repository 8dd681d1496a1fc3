//! custodian-client - typed adapter to the custodian daemon
//!
//! The custodian is a separate long-running process that owns authoritative
//! identity, session, and favorites state, reachable only over a local RPC
//! transport. This crate gives in-process callers a stable capability
//! interface on top of it:
//!
//! - **Services**: stub contracts for the four daemon services (identify,
//!   session, favorite, user), injected at construction
//! - **Call runner**: races each blocking remote call against the caller's
//!   cancellation token
//! - **Keys**: validation and classification of daemon-returned key material
//!   into verifying keys and crypt public keys
//! - **Client**: the [`Custodian`] façade tying the above together
//!
//! Transport setup (socket discovery, framing, protocol registration) is the
//! embedder's concern, as is the daemon itself.

pub mod call;
pub mod client;
pub mod error;
pub mod keys;
pub mod logging;
pub mod services;
pub mod types;

pub use client::{Custodian, CustodianClient};
pub use error::{ClientError, Result};
