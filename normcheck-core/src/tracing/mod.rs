//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Normcheck tracing/logging system.
///
/// Reads `NORMCHECK_LOG` for per-subsystem log levels, e.g.
/// `NORMCHECK_LOG=normcheck_analysis=debug,normcheck_storage=warn`.
/// Falls back to `normcheck=info` if unset or invalid.
///
/// Idempotent — calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("NORMCHECK_LOG")
            .unwrap_or_else(|_| EnvFilter::new("normcheck=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
