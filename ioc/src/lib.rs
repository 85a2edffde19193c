//! # Billo IoC
//!
//! A small, thread-safe Inversion of Control (IoC) container for Rust that
//! wires object graphs from registered constructor metadata.
//!
//! ## Core Concepts
//!
//! - **Contract**: a string key client code depends on, usually an interface
//!   name.
//! - **Producer**: what a contract is bound to, either a type to construct
//!   or a factory closure.
//! - **Type descriptor**: the constructor metadata of a type (parameter
//!   names, declared types, defaults, nullability). Resolution reads it the
//!   way a reflective container reads a constructor signature.
//! - **Argument bag**: caller-supplied construction arguments, by name or by
//!   position.
//! - **Singleton**: a contract whose first constructed instance is cached by
//!   its container.
//!
//! ## Parameter Binding
//!
//! Every constructor parameter is satisfied by the first of these that
//! applies:
//!
//! 1. a named argument with the parameter's name,
//! 2. the next positional argument,
//! 3. recursive resolution of the parameter's contract type,
//! 4. the declared default,
//! 5. `Value::Null` if the parameter is nullable,
//!
//! otherwise resolution fails with `Error::UnresolvableParameter`.
//!
//! ## Quick Start
//!
//! ```
//! use billo_ioc::{Container, Parameter, ParamType, TypeDescriptor, Value};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!   fn log(&self, message: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!   fn log(&self, message: &str) -> String {
//!     format!("[console] {}", message)
//!   }
//! }
//!
//! struct Service {
//!   logger: Arc<dyn Logger>,
//!   retries: i64,
//! }
//!
//! let container = Container::new();
//! container
//!   .register(TypeDescriptor::interface("Logger"))
//!   .register(
//!     TypeDescriptor::class::<Service>("Service")
//!       .param(Parameter::contract("logger", "Logger"))
//!       .param(Parameter::new("retries", ParamType::Int).default(3))
//!       .construct(|args| {
//!         Ok(Service {
//!           logger: args.get("logger")?,
//!           retries: args.get("retries")?,
//!         })
//!       }),
//!   );
//!
//! container.factory("Logger", |_, _| {
//!   let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger);
//!   Ok(Value::Object(billo_ioc::Object::from_arc(logger)))
//! });
//!
//! let service = container.get::<Service>("Service").unwrap();
//! assert_eq!(service.retries, 3);
//! assert_eq!(service.logger.log("up"), "[console] up");
//! ```

mod args;
mod config;
mod container;
mod core;
mod descriptor;
mod error;
mod global;
mod macros;
mod value;

pub use args::{ArgumentBag, Arguments};
pub use config::{BindingConfig, ContainerConfig};
pub use container::Container;
pub use core::{ContractKey, Factory, Lifetime, Producer};
pub use descriptor::{ClassBuilder, ParamType, Parameter, TypeDescriptor};
pub use error::{Error, Result};
pub use global::global;
pub use value::{FromValue, Object, ObjectBuilder, Value};
