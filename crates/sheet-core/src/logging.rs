#![forbid(unsafe_code)]

//! JSON log output for hosts that embed the sheet core.
//!
//! Every sheet crate logs through `tracing`. Hosts that have no subscriber
//! of their own can call [`init_json_logging`] once at startup to get one
//! JSON object per event on stderr.
//!
//! The filter is read from the `SHEET_LOG` environment variable using the
//! usual `EnvFilter` directive syntax (for example
//! `SHEET_LOG=sheet_runtime=debug`). Without it, `info` and above are kept.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "SHEET_LOG";

/// Install a global JSON subscriber.
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already installed.
pub fn init_json_logging() -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
}
