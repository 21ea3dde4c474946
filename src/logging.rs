//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence when set. Otherwise only warnings are shown, `--verbose`
/// adds the per-step progress and `--debug` every decision and remote call.
pub fn init(verbose: bool, debug: bool) -> Result<(), AppError> {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| AppError::LoggingErr(err.to_string()))
}
