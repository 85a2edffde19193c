//! Subscriber setup for the binary. Library code only emits events.

use crate::error::{AppError, Result};
use std::io;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, `warn` when
/// unset. Stdout stays reserved for the console protocol.
pub fn init() -> Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .try_init()
    .map_err(|e| AppError::Logging(e.to_string()))
}
