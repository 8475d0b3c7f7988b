//! Tracing subscriber setup for hosts embedding the crate.
//!
//! The library only emits events; installing a subscriber is the host's
//! call. The `sign_in_flow` demo installs one through this helper.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("invalid log directive `{directive}`: {reason}")]
    InvalidDirective { directive: String, reason: String },
}

/// Install a fmt subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (for example
/// `"smartmoney=info"`) is used.
pub fn init_logging(default_directive: &str) -> Result<(), LoggingError> {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::try_new(default_directive).map_err(|err| {
            LoggingError::InvalidDirective {
                directive: default_directive.to_string(),
                reason: err.to_string(),
            }
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
