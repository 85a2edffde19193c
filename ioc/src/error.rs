use thiserror::Error;

/// The error type for every registration and resolution operation.
///
/// All errors are raised where they are detected and propagate unchanged
/// through recursive resolution, so the error returned from `resolve`
/// names the deepest contract, type or parameter that failed.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Cannot resolve '{type_name}': type does not exist")]
  TypeNotFound { type_name: String },

  #[error("Cannot resolve '{type_name}': not instantiable")]
  TypeNotInstantiable { type_name: String },

  #[error("Cannot resolve parameter '{parameter}' for {type_name}::new()")]
  UnresolvableParameter { parameter: String, type_name: String },

  #[error("Factory for '{contract}' did not return an object (got {found})")]
  FactoryResultInvalid { contract: String, found: &'static str },

  #[error("Instance registered for '{contract}' is not an object (got {found})")]
  InvalidInstance { contract: String, found: &'static str },

  #[error("Stored instance for '{contract}' is not an object (got {found})")]
  CachedInstanceInvalid { contract: String, found: &'static str },

  #[error("Circular binding detected while resolving '{contract}': {}", path.join(" -> "))]
  CircularBinding { contract: String, path: Vec<String> },

  #[error("Argument '{parameter}' for {type_name} expected {expected}, got {found}")]
  ArgumentMismatch {
    type_name: String,
    parameter: String,
    expected: String,
    found: &'static str,
  },

  #[error("{type_name} reads parameter '{parameter}' which it does not declare")]
  UndeclaredParameter { type_name: String, parameter: String },

  #[error("Instance resolved for '{contract}' cannot be viewed as {expected}")]
  Downcast { contract: String, expected: &'static str },

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),
}

/// A specialized `Result` type for `billo_ioc` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
