//! Debug logging for the diagnostic machinery.
//!
//! Buffering decisions, flushes, snapshot push/pop and aborts are traced
//! under the `ftn_diagnostic` target:
//!
//! - `RUST_LOG=ftn_diagnostic=debug`: reports, flushes and aborts.
//! - `RUST_LOG=ftn_diagnostic=trace`: also buffer snapshots and suppression.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times. Does nothing
/// unless `RUST_LOG` is set. Log lines go to stderr, interleaved with the
/// diagnostics themselves.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
