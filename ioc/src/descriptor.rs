//! Constructor metadata.
//!
//! Rust has no runtime reflection, so every type the container may build is
//! described up front by a [`TypeDescriptor`]: its parameter list (name,
//! declared type, default, nullability), the interface views it exposes and
//! a constructor closure. Interfaces are described too, without a
//! constructor, so the container can tell "does not exist" apart from
//! "exists but cannot be instantiated".
//!
//! ```
//! use billo_ioc::{Parameter, ParamType, TypeDescriptor};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {}
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {}
//!
//! struct Service {
//!   logger: Arc<dyn Logger>,
//!   retries: i64,
//! }
//!
//! let service = TypeDescriptor::class::<Service>("Service")
//!   .param(Parameter::contract("logger", "Logger"))
//!   .param(Parameter::new("retries", ParamType::Int).default(3))
//!   .construct(|args| {
//!     Ok(Service {
//!       logger: args.get("logger")?,
//!       retries: args.get("retries")?,
//!     })
//!   });
//!
//! assert!(service.is_instantiable());
//! assert_eq!(service.parameters().len(), 2);
//! ```

use crate::args::Arguments;
use crate::core::ContractKey;
use crate::error::{Error, Result};
use crate::value::{Object, ObjectBuilder, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type Constructor = Arc<dyn Fn(&Arguments) -> Result<Object> + Send + Sync>;

/// The declared type of a constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
  /// No declared type. Never autowired, never implicitly nullable.
  Untyped,
  Bool,
  Int,
  Float,
  Str,
  /// A class or interface; resolved recursively as a contract.
  Contract(ContractKey),
}

impl ParamType {
  pub fn is_builtin(&self) -> bool {
    !matches!(self, ParamType::Contract(_))
  }
}

/// One constructor parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
  name: String,
  ty: ParamType,
  default: Option<Value>,
  nullable: bool,
}

impl Parameter {
  pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
    Self {
      name: name.into(),
      ty,
      default: None,
      nullable: false,
    }
  }

  /// A parameter typed as contract `contract`.
  pub fn contract(name: impl Into<String>, contract: impl Into<ContractKey>) -> Self {
    Self::new(name, ParamType::Contract(contract.into()))
  }

  pub fn untyped(name: impl Into<String>) -> Self {
    Self::new(name, ParamType::Untyped)
  }

  /// Declares a default value.
  pub fn default(mut self, value: impl Into<Value>) -> Self {
    self.default = Some(value.into());
    self
  }

  /// Declares that the type admits an absent value.
  pub fn nullable(mut self) -> Self {
    self.nullable = true;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn ty(&self) -> &ParamType {
    &self.ty
  }

  pub fn default_value(&self) -> Option<&Value> {
    self.default.as_ref()
  }

  pub fn is_nullable(&self) -> bool {
    self.nullable
  }
}

/// Metadata for one type known to the container.
#[derive(Clone)]
pub struct TypeDescriptor {
  name: ContractKey,
  parameters: Vec<Parameter>,
  constructor: Option<Constructor>,
}

impl TypeDescriptor {
  /// An interface or abstract type: known, but not instantiable.
  pub fn interface(name: impl Into<ContractKey>) -> Self {
    Self {
      name: name.into(),
      parameters: Vec::new(),
      constructor: None,
    }
  }

  /// Starts describing the concrete type `T`, registered as `name`.
  pub fn class<T: Any + Send + Sync>(name: impl Into<ContractKey>) -> ClassBuilder<T> {
    ClassBuilder {
      name: name.into(),
      parameters: Vec::new(),
      views: Vec::new(),
    }
  }

  pub fn name(&self) -> &ContractKey {
    &self.name
  }

  pub fn parameters(&self) -> &[Parameter] {
    &self.parameters
  }

  pub fn is_instantiable(&self) -> bool {
    self.constructor.is_some()
  }

  pub(crate) fn instantiate(&self, args: &Arguments) -> Result<Object> {
    match &self.constructor {
      Some(construct) => construct(args),
      None => Err(Error::TypeNotInstantiable {
        type_name: self.name.to_string(),
      }),
    }
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeDescriptor")
      .field("name", &self.name)
      .field("parameters", &self.parameters)
      .field("instantiable", &self.is_instantiable())
      .finish()
  }
}

type ViewFn<T> = Box<dyn Fn(&Arc<T>, ObjectBuilder) -> ObjectBuilder + Send + Sync>;

/// Builder for the descriptor of a concrete type `T`.
pub struct ClassBuilder<T> {
  name: ContractKey,
  parameters: Vec<Parameter>,
  views: Vec<ViewFn<T>>,
}

impl<T: Any + Send + Sync> ClassBuilder<T> {
  /// Appends a constructor parameter. Declaration order is binding order.
  pub fn param(mut self, parameter: Parameter) -> Self {
    self.parameters.push(parameter);
    self
  }

  /// Declares that `T` implements interface `I`, so instances can be
  /// consumed as `Arc<I>`. The closure is usually `|this| this`.
  pub fn implements<I, F>(mut self, upcast: F) -> Self
  where
    I: ?Sized + Any + Send + Sync,
    F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
  {
    self.views.push(Box::new(move |this: &Arc<T>, builder: ObjectBuilder| {
      builder.view(upcast(Arc::clone(this)))
    }));
    self
  }

  /// Finishes the descriptor with the constructor for `T`.
  pub fn construct<F>(self, constructor: F) -> TypeDescriptor
  where
    F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
  {
    let views = self.views;
    let constructor: Constructor = Arc::new(move |args: &Arguments| {
      let this = Arc::new(constructor(args)?);
      let builder = views
        .iter()
        .fold(Object::builder(Arc::clone(&this)), |builder, view| view(&this, builder));
      Ok(builder.build())
    });
    TypeDescriptor {
      name: self.name,
      parameters: self.parameters,
      constructor: Some(constructor),
    }
  }
}
