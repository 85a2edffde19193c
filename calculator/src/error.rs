use thiserror::Error;

/// Failures of the `billo-calc` binary outside of term evaluation.
#[derive(Debug, Error)]
pub enum AppError {
  #[error("Container error: {0}")]
  Container(#[from] billo_ioc::Error),

  #[error("Configuration file not found: {0}")]
  ConfigNotFound(String),

  #[error("Console I/O failed: {0}")]
  Io(#[from] std::io::Error),

  #[error("Failed to set global tracing subscriber: {0}")]
  Logging(String),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
