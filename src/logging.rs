//! Tracing setup for binaries and tests embedding the client.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! the embedder's choice. This helper wires up the conventional one.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install an env-filtered fmt subscriber.
///
/// `RUST_LOG` takes precedence; `default_level` applies to this crate when the
/// environment says nothing. Safe to call more than once - later calls are
/// ignored.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("custodian_client={default_level},info").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
