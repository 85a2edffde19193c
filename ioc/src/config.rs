//! Declarative binding configuration.
//!
//! A YAML document listing contract-to-class bindings, applied in file
//! order:
//!
//! ```yaml
//! bindings:
//!   - contract: Io
//!     class: Console
//!     singleton: true
//!   - contract: Calculator
//!     class: ArithmeticCalculator
//! ```
//!
//! Only class producers can be configured; factories are code.

use crate::container::Container;
use crate::core::Lifetime;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ContainerConfig {
  #[serde(default)]
  pub bindings: Vec<BindingConfig>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
  pub contract: String,
  pub class: String,
  #[serde(default)] // Defaults to transient
  pub singleton: bool,
}

impl BindingConfig {
  pub fn lifetime(&self) -> Lifetime {
    if self.singleton {
      Lifetime::Singleton
    } else {
      Lifetime::Transient
    }
  }
}

impl ContainerConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let source = fs::read_to_string(path)?;
    Self::from_yaml_str(&source)
  }
}

impl Container {
  /// Applies every binding of `config`, in order.
  pub fn configure(&self, config: &ContainerConfig) -> &Self {
    for binding in &config.bindings {
      self.bind_with_lifetime(binding.contract.as_str(), binding.class.as_str(), binding.lifetime());
    }
    self
  }
}
