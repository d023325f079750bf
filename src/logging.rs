//! Structured logging initialization.
//!
//! The library logs through `tracing` everywhere; this helper wires a
//! default subscriber for embedders and tests that don't bring their own.
//! Log level is configurable via `RUST_LOG`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. Safe to call more than once; later
/// calls are no-ops if a global subscriber is already installed.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ethsession=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
