//! The main `Container` struct and its associated methods.

use crate::args::{ArgumentBag, Arguments};
use crate::core::{ContractKey, Lifetime, Producer, ResolutionGuard};
use crate::descriptor::{ParamType, TypeDescriptor};
use crate::error::{Error, Result};
use crate::value::{Object, Value};
use dashmap::DashMap;
use parking_lot::ReentrantMutex;
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashMap;
use std::iter;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Default)]
struct Registrations {
  bindings: HashMap<ContractKey, Producer>,
  singletons: HashMap<ContractKey, bool>,
  instances: HashMap<ContractKey, Value>,
}

impl Registrations {
  fn is_singleton(&self, contract: &str) -> bool {
    self.singletons.get(contract).copied().unwrap_or(false)
  }
}

#[derive(Default)]
struct State {
  registrations: RefCell<Registrations>,
  resolving: RefCell<Vec<ContractKey>>,
}

/// The Inversion of Control (IoC) container.
///
/// Holds the bindings, singleton flags and cached instances for every
/// contract, plus the type metadata used to autowire constructors. It is
/// thread-safe: the mutable state sits behind a single re-entrant lock held
/// for the duration of a resolution, so factories may resolve from the
/// container they were called by, and concurrent first resolutions of a
/// singleton construct it exactly once.
#[derive(Default)]
pub struct Container {
  state: ReentrantMutex<State>,
  types: DashMap<ContractKey, Arc<TypeDescriptor>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Type Metadata ---

  /// Registers the metadata of a type, replacing any previous descriptor
  /// with the same name.
  pub fn register(&self, descriptor: TypeDescriptor) -> &Self {
    trace!(type_name = %descriptor.name(), "registering type");
    self
      .types
      .insert(descriptor.name().clone(), Arc::new(descriptor));
    self
  }

  pub fn register_all<I>(&self, descriptors: I) -> &Self
  where
    I: IntoIterator<Item = TypeDescriptor>,
  {
    for descriptor in descriptors {
      self.register(descriptor);
    }
    self
  }

  pub fn is_registered(&self, type_name: &str) -> bool {
    self.types.contains_key(type_name)
  }

  // --- Binding Registration ---

  /// Binds `contract` to `producer` as a transient.
  pub fn bind(&self, contract: impl Into<ContractKey>, producer: impl Into<Producer>) -> &Self {
    self.bind_with_lifetime(contract, producer, Lifetime::Transient)
  }

  /// Binds `contract` to `producer` with the given lifetime. Re-binding a
  /// contract replaces its producer and flag and drops any cached instance.
  pub fn bind_with_lifetime(
    &self,
    contract: impl Into<ContractKey>,
    producer: impl Into<Producer>,
    lifetime: Lifetime,
  ) -> &Self {
    let contract = contract.into();
    let producer = producer.into();
    debug!(contract = %contract, producer = ?producer, ?lifetime, "binding contract");

    let state = self.state.lock();
    let mut registrations = state.registrations.borrow_mut();
    registrations.instances.remove(&contract);
    registrations
      .singletons
      .insert(contract.clone(), lifetime.is_singleton());
    registrations.bindings.insert(contract, producer);
    self
  }

  /// Binds every `(contract, producer)` pair in iteration order, as
  /// transients.
  pub fn bind_all<I, K, P>(&self, mapping: I) -> &Self
  where
    I: IntoIterator<Item = (K, P)>,
    K: Into<ContractKey>,
    P: Into<Producer>,
  {
    for (contract, producer) in mapping {
      self.bind(contract, producer);
    }
    self
  }

  /// Binds `contract` to `producer` as a singleton.
  pub fn singleton(&self, contract: impl Into<ContractKey>, producer: impl Into<Producer>) -> &Self {
    self.bind_with_lifetime(contract, producer, Lifetime::Singleton)
  }

  /// Binds `contract` to a transient factory.
  pub fn factory<F>(&self, contract: impl Into<ContractKey>, factory: F) -> &Self
  where
    F: Fn(&Container, &ArgumentBag) -> Result<Value> + Send + Sync + 'static,
  {
    self.bind(contract, Producer::factory(factory))
  }

  /// Binds `contract` to a singleton factory.
  pub fn singleton_factory<F>(&self, contract: impl Into<ContractKey>, factory: F) -> &Self
  where
    F: Fn(&Container, &ArgumentBag) -> Result<Value> + Send + Sync + 'static,
  {
    self.singleton(contract, Producer::factory(factory))
  }

  /// Registers an already-built instance. The contract becomes a singleton
  /// and resolves to exactly this instance; bindings are left untouched.
  pub fn set(&self, contract: impl Into<ContractKey>, instance: impl Into<Value>) -> Result<&Self> {
    let contract = contract.into();
    let instance = instance.into();
    if instance.as_object().is_none() {
      return Err(Error::InvalidInstance {
        contract: contract.to_string(),
        found: instance.kind(),
      });
    }
    debug!(contract = %contract, "registering instance");

    let state = self.state.lock();
    let mut registrations = state.registrations.borrow_mut();
    registrations.singletons.insert(contract.clone(), true);
    registrations.instances.insert(contract, instance);
    Ok(self)
  }

  pub fn is_bound(&self, contract: &str) -> bool {
    let state = self.state.lock();
    let bound = state.registrations.borrow().bindings.contains_key(contract);
    bound
  }

  pub fn is_singleton(&self, contract: &str) -> bool {
    let state = self.state.lock();
    let singleton = state.registrations.borrow().is_singleton(contract);
    singleton
  }

  pub fn has_instance(&self, contract: &str) -> bool {
    let state = self.state.lock();
    let cached = state.registrations.borrow().instances.contains_key(contract);
    cached
  }

  // --- Resolution ---

  /// Resolves `contract` without caller-supplied arguments.
  pub fn resolve(&self, contract: impl Into<ContractKey>) -> Result<Object> {
    self.resolve_with(contract, iter::empty())
  }

  /// Resolves `contract`, merging `bags` into one argument bag (later bags
  /// win). A cached singleton is returned as-is and the arguments are
  /// ignored.
  pub fn resolve_with<I>(&self, contract: impl Into<ContractKey>, bags: I) -> Result<Object>
  where
    I: IntoIterator<Item = ArgumentBag>,
  {
    let contract = contract.into();
    let provided = ArgumentBag::merged(bags);
    let state = self.state.lock();

    if let Some(cached) = Self::cached(&state, &contract)? {
      trace!(contract = %contract, "returning cached singleton");
      return Ok(cached);
    }

    let _guard = ResolutionGuard::enter(&state.resolving, &contract)?;

    // Fall back to treating the contract name itself as the type to build.
    let producer = state
      .registrations
      .borrow()
      .bindings
      .get(&contract)
      .cloned()
      .unwrap_or_else(|| Producer::Class(contract.clone()));

    let object = self.build(&state, &contract, producer, &provided)?;

    let mut registrations = state.registrations.borrow_mut();
    if registrations.is_singleton(&contract) {
      trace!(contract = %contract, "caching singleton");
      registrations
        .instances
        .insert(contract, Value::Object(object.clone()));
    }
    Ok(object)
  }

  /// Resolves `contract` and views the result as `Arc<T>`.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, contract: impl Into<ContractKey>) -> Result<Arc<T>> {
    self.get_with(contract, iter::empty())
  }

  pub fn get_with<T, I>(&self, contract: impl Into<ContractKey>, bags: I) -> Result<Arc<T>>
  where
    T: ?Sized + Any + Send + Sync,
    I: IntoIterator<Item = ArgumentBag>,
  {
    let contract = contract.into();
    let object = self.resolve_with(&contract, bags)?;
    object.downcast::<T>().ok_or_else(|| Error::Downcast {
      contract: contract.to_string(),
      expected: type_name::<T>(),
    })
  }

  // --- PRIVATE HELPERS ---

  fn cached(state: &State, contract: &ContractKey) -> Result<Option<Object>> {
    let registrations = state.registrations.borrow();
    if !registrations.is_singleton(contract) {
      return Ok(None);
    }
    match registrations.instances.get(contract) {
      None => Ok(None),
      Some(Value::Object(object)) => Ok(Some(object.clone())),
      Some(other) => Err(Error::CachedInstanceInvalid {
        contract: contract.to_string(),
        found: other.kind(),
      }),
    }
  }

  fn build(
    &self,
    state: &State,
    contract: &ContractKey,
    producer: Producer,
    provided: &ArgumentBag,
  ) -> Result<Object> {
    let target = match producer {
      Producer::Factory(factory) => {
        trace!(contract = %contract, "invoking factory");
        return factory(self, provided)?
          .into_object()
          .map_err(|value| Error::FactoryResultInvalid {
            contract: contract.to_string(),
            found: value.kind(),
          });
      }
      Producer::Class(target) => target,
    };

    let is_alias = state
      .registrations
      .borrow()
      .bindings
      .get(&target)
      .is_some_and(|bound| !bound.is_class(&target));
    if is_alias {
      trace!(contract = %contract, target = %target, "following alias");
      return self.resolve_with(target, iter::once(provided.clone()));
    }

    // Clone the descriptor out so no map guard is held while constructing.
    let descriptor = self
      .types
      .get(&target)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| Error::TypeNotFound {
        type_name: target.to_string(),
      })?;
    if !descriptor.is_instantiable() {
      return Err(Error::TypeNotInstantiable {
        type_name: target.to_string(),
      });
    }

    let args = self.bind_parameters(&descriptor, provided)?;
    descriptor.instantiate(&args)
  }

  /// Resolves every constructor parameter in declaration order: named
  /// argument, positional argument, contract autowiring, declared default,
  /// null for nullable types.
  fn bind_parameters(&self, descriptor: &TypeDescriptor, provided: &ArgumentBag) -> Result<Arguments> {
    let owner = descriptor.name();
    let mut args = Arguments::new(owner.as_str());
    let mut positional_index = 0;

    for param in descriptor.parameters() {
      let name = param.name();

      let value = if let Some(value) = provided.named(name) {
        trace!(type_name = %owner, parameter = name, "named argument");
        value.clone()
      } else if let Some(value) = provided.positional(positional_index) {
        trace!(type_name = %owner, parameter = name, index = positional_index, "positional argument");
        positional_index += 1;
        value.clone()
      } else if let ParamType::Contract(dependency) = param.ty() {
        trace!(type_name = %owner, parameter = name, dependency = %dependency, "autowiring");
        Value::Object(self.resolve(dependency)?)
      } else if let Some(default) = param.default_value() {
        default.clone()
      } else if param.is_nullable() {
        Value::Null
      } else {
        return Err(Error::UnresolvableParameter {
          parameter: name.to_owned(),
          type_name: owner.to_string(),
        });
      };

      args.push(name, value);
    }

    Ok(args)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn corrupted_cache_slot_is_reported() {
    let container = Container::new();
    container.singleton("Clock", "SystemClock");
    {
      let state = container.state.lock();
      state
        .registrations
        .borrow_mut()
        .instances
        .insert("Clock".into(), Value::Int(42));
    }

    match container.resolve("Clock") {
      Err(Error::CachedInstanceInvalid { contract, found }) => {
        assert_eq!(contract, "Clock");
        assert_eq!(found, "int");
      }
      other => panic!("expected a cached instance error, got {:?}", other),
    }
  }

  #[test]
  fn resolution_path_is_empty_after_failure() {
    let container = Container::new();
    assert!(container.resolve("Missing").is_err());
    assert!(container.state.lock().resolving.borrow().is_empty());
  }

  #[test]
  fn rebinding_drops_cached_instance() {
    let container = Container::new();
    container.set("Clock", Object::new(1_u8)).unwrap();
    assert!(container.has_instance("Clock"));

    container.bind("Clock", "SystemClock");
    assert!(!container.has_instance("Clock"));
    assert!(!container.is_singleton("Clock"));
  }
}
