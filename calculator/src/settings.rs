//! Locating the optional binding file.

use crate::error::{AppError, Result};
use billo_ioc::ContainerConfig;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub const CONFIG_ENV_VAR: &str = "BILLO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "billo.yaml";

/// Finds the binding file: `$BILLO_CONFIG` if set, else `./billo.yaml`.
///
/// A path named by the environment variable must exist. Returns `Ok(None)`
/// when neither is present.
pub fn find_config_file() -> Result<Option<PathBuf>> {
  if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
    let path = PathBuf::from(path);
    if !path.is_file() {
      return Err(AppError::ConfigNotFound(format!(
        "{:?} (from {})",
        path, CONFIG_ENV_VAR
      )));
    }
    return Ok(Some(path));
  }

  let path = PathBuf::from(".").join(DEFAULT_CONFIG_FILE);
  Ok(path.is_file().then_some(path))
}

/// Loads the binding file if one is found.
pub fn load_config() -> Result<Option<ContainerConfig>> {
  let Some(path) = find_config_file()? else {
    debug!("no binding file found, using built-in bindings");
    return Ok(None);
  };
  debug!(path = ?path, "loading binding file");
  Ok(Some(ContainerConfig::from_file(&path)?))
}
