//! Core data structures shared by the container: keys, producers and the
//! resolution path guard.

use crate::args::ArgumentBag;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::value::Value;
use std::borrow::Borrow;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// The identifier a contract or a concrete type is registered under.
///
/// Keys are plain strings (an interface name, a type name or any other
/// token). Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContractKey(Arc<str>);

impl ContractKey {
  pub fn new(name: impl AsRef<str>) -> Self {
    Self(Arc::from(name.as_ref()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Deref for ContractKey {
  type Target = str;

  fn deref(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for ContractKey {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl From<&str> for ContractKey {
  fn from(name: &str) -> Self {
    Self::new(name)
  }
}

impl From<String> for ContractKey {
  fn from(name: String) -> Self {
    Self(Arc::from(name))
  }
}

impl From<&String> for ContractKey {
  fn from(name: &String) -> Self {
    Self::new(name)
  }
}

impl From<&ContractKey> for ContractKey {
  fn from(key: &ContractKey) -> Self {
    key.clone()
  }
}

impl fmt::Display for ContractKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for ContractKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({})", self.0)
  }
}

/// A factory callable. It receives the container (so it can resolve its own
/// dependencies) and the merged argument bag of the current resolution.
pub type Factory = Arc<dyn Fn(&Container, &ArgumentBag) -> Result<Value> + Send + Sync>;

/// What a contract is bound to.
#[derive(Clone)]
pub enum Producer {
  /// Instantiate (or redirect to) the named type.
  Class(ContractKey),
  /// Call a factory.
  Factory(Factory),
}

impl Producer {
  pub fn class(name: impl Into<ContractKey>) -> Self {
    Producer::Class(name.into())
  }

  pub fn factory<F>(factory: F) -> Self
  where
    F: Fn(&Container, &ArgumentBag) -> Result<Value> + Send + Sync + 'static,
  {
    Producer::Factory(Arc::new(factory))
  }

  /// Whether this producer is the class producer for `key` itself.
  pub(crate) fn is_class(&self, key: &ContractKey) -> bool {
    matches!(self, Producer::Class(target) if target == key)
  }
}

impl From<&str> for Producer {
  fn from(name: &str) -> Self {
    Producer::Class(name.into())
  }
}

impl From<String> for Producer {
  fn from(name: String) -> Self {
    Producer::Class(name.into())
  }
}

impl From<ContractKey> for Producer {
  fn from(key: ContractKey) -> Self {
    Producer::Class(key)
  }
}

impl fmt::Debug for Producer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Producer::Class(target) => write!(f, "Class({})", target),
      Producer::Factory(_) => f.write_str("Factory(..)"),
    }
  }
}

/// How long a resolved instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
  /// A new instance on every resolution.
  #[default]
  Transient,
  /// The first constructed instance is cached and reused.
  Singleton,
}

impl Lifetime {
  pub(crate) fn is_singleton(self) -> bool {
    self == Lifetime::Singleton
  }
}

/// An RAII guard that records a contract on the container's in-progress
/// resolution path.
///
/// Entering a contract that is already on the path means the bindings or
/// constructor dependencies form a cycle, and `enter` fails with
/// `Error::CircularBinding`. Dropping the guard pops the contract again.
pub(crate) struct ResolutionGuard<'a> {
  path: &'a RefCell<Vec<ContractKey>>,
}

impl<'a> ResolutionGuard<'a> {
  pub(crate) fn enter(path: &'a RefCell<Vec<ContractKey>>, key: &ContractKey) -> Result<Self> {
    let mut stack = path.borrow_mut();
    if let Some(start) = stack.iter().position(|entry| entry == key) {
      let mut cycle: Vec<String> = stack[start..].iter().map(ToString::to_string).collect();
      cycle.push(key.to_string());
      return Err(Error::CircularBinding {
        contract: key.to_string(),
        path: cycle,
      });
    }
    stack.push(key.clone());
    Ok(Self { path })
  }
}

impl Drop for ResolutionGuard<'_> {
  fn drop(&mut self) {
    self.path.borrow_mut().pop();
  }
}
