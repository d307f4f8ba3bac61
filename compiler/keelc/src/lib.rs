//! Keel driver library.
//!
//! The `keel` binary is a thin shell over [`commands`]; everything that does
//! not touch the process (reading the environment aside) lives here so it
//! can be tested.

pub mod commands;
mod config;

use std::sync::Once;

pub use config::{ConfigError, DriverConfig, LOG_VAR, MAX_DEPTH_VAR};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once per process.
///
/// Nothing is installed unless `KEEL_LOG` is set. Its value is an
/// `EnvFilter` directive such as `keel_eval=trace`; an unparsable value
/// falls back to `warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var(LOG_VAR).is_ok() {
            let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        }
    });
}
