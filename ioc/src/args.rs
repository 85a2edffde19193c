//! Caller-supplied argument bags and the resolved constructor arguments.

use crate::error::{Error, Result};
use crate::value::{FromValue, Value};
use std::collections::{BTreeMap, HashMap};

/// Construction arguments supplied by the caller of a resolution.
///
/// Named and positional entries are kept in two separate maps and merged
/// independently: when bags are merged, a later bag's entry replaces an
/// earlier one with the same name or index.
#[derive(Debug, Clone, Default)]
pub struct ArgumentBag {
  named: HashMap<String, Value>,
  positional: BTreeMap<usize, Value>,
}

impl ArgumentBag {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a named argument.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.named.insert(name.into(), value.into());
    self
  }

  /// Adds a positional argument after the highest index set so far.
  pub fn push(mut self, value: impl Into<Value>) -> Self {
    let next = self.positional.keys().next_back().map_or(0, |last| last + 1);
    self.positional.insert(next, value.into());
    self
  }

  /// Sets the positional argument at `index`.
  pub fn at(mut self, index: usize, value: impl Into<Value>) -> Self {
    self.positional.insert(index, value.into());
    self
  }

  pub fn named(&self, name: &str) -> Option<&Value> {
    self.named.get(name)
  }

  pub fn positional(&self, index: usize) -> Option<&Value> {
    self.positional.get(&index)
  }

  pub fn is_empty(&self) -> bool {
    self.named.is_empty() && self.positional.is_empty()
  }

  pub fn len(&self) -> usize {
    self.named.len() + self.positional.len()
  }

  /// Merges `other` into `self`; entries of `other` win on collision.
  pub fn merge(&mut self, other: ArgumentBag) {
    self.named.extend(other.named);
    self.positional.extend(other.positional);
  }

  /// Merges bags in order into one.
  pub fn merged<I>(bags: I) -> Self
  where
    I: IntoIterator<Item = ArgumentBag>,
  {
    bags.into_iter().fold(Self::new(), |mut acc, bag| {
      acc.merge(bag);
      acc
    })
  }
}

/// The resolved constructor arguments of one instantiation, in parameter
/// declaration order.
#[derive(Debug, Clone)]
pub struct Arguments {
  type_name: String,
  values: Vec<(String, Value)>,
}

impl Arguments {
  pub(crate) fn new(type_name: impl Into<String>) -> Self {
    Self {
      type_name: type_name.into(),
      values: Vec::new(),
    }
  }

  pub(crate) fn push(&mut self, name: &str, value: Value) {
    self.values.push((name.to_owned(), value));
  }

  /// The type being constructed.
  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  /// Reads the argument for parameter `name` as `T`.
  pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
    let value = self.value(name).ok_or_else(|| Error::UndeclaredParameter {
      type_name: self.type_name.clone(),
      parameter: name.to_owned(),
    })?;
    T::from_value(value).ok_or_else(|| Error::ArgumentMismatch {
      type_name: self.type_name.clone(),
      parameter: name.to_owned(),
      expected: T::expected().into_owned(),
      found: value.kind(),
    })
  }

  /// The raw value for parameter `name`.
  pub fn value(&self, name: &str) -> Option<&Value> {
    self
      .values
      .iter()
      .find(|(param, _)| param == name)
      .map(|(_, value)| value)
  }

  /// The raw value at declaration position `index`.
  pub fn at(&self, index: usize) -> Option<&Value> {
    self.values.get(index).map(|(_, value)| value)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn later_bags_override_earlier_ones() {
    let first = ArgumentBag::new().with("dsn", "sqlite::memory:").push(1).push(2);
    let second = ArgumentBag::new().with("dsn", "postgres://db").at(1, 20);

    let merged = ArgumentBag::merged([first, second]);

    assert!(matches!(merged.named("dsn"), Some(Value::Str(s)) if s == "postgres://db"));
    assert!(matches!(merged.positional(0), Some(Value::Int(1))));
    assert!(matches!(merged.positional(1), Some(Value::Int(20))));
    assert_eq!(merged.len(), 3);
  }

  #[test]
  fn named_and_positional_keys_are_independent() {
    let bag = ArgumentBag::new().with("0", "named zero").push("positional zero");

    assert!(matches!(bag.named("0"), Some(Value::Str(s)) if s == "named zero"));
    assert!(matches!(bag.positional(0), Some(Value::Str(s)) if s == "positional zero"));
  }

  #[test]
  fn push_continues_after_highest_index() {
    let bag = ArgumentBag::new().at(3, 'x'.to_string()).push(4);
    assert!(matches!(bag.positional(4), Some(Value::Int(4))));
    assert!(bag.positional(0).is_none());
  }

  #[test]
  fn typed_access_reports_mismatches() {
    let mut args = Arguments::new("Service");
    args.push("retries", Value::Str("three".into()));

    match args.get::<i64>("retries") {
      Err(Error::ArgumentMismatch { parameter, expected, found, .. }) => {
        assert_eq!(parameter, "retries");
        assert_eq!(expected, "int");
        assert_eq!(found, "string");
      }
      other => panic!("expected a mismatch, got {:?}", other),
    }
    assert!(matches!(
      args.get::<i64>("timeout"),
      Err(Error::UndeclaredParameter { .. })
    ));
  }
}
