//! Type descriptors and default bindings of the calculator object graph.

use crate::app::CalculatorApp;
use crate::calculator::{ArithmeticCalculator, Calculator};
use crate::error::Result;
use crate::io::{Console, InputReader, Io, OutputWriter};
use billo_ioc::{Container, ContainerConfig, Parameter, TypeDescriptor};
use std::sync::Arc;

pub const IO: &str = "Io";
pub const CALCULATOR: &str = "Calculator";
pub const CONSOLE: &str = "Console";
pub const ARITHMETIC_CALCULATOR: &str = "ArithmeticCalculator";
pub const APP: &str = "CalculatorApp";

pub fn register_types(container: &Container) -> &Container {
  container.register_all([
    TypeDescriptor::interface(IO),
    TypeDescriptor::interface(CALCULATOR),
    TypeDescriptor::class::<Console>(CONSOLE)
      .implements::<dyn Io, _>(|this| this)
      .implements::<dyn InputReader, _>(|this| this)
      .implements::<dyn OutputWriter, _>(|this| this)
      .construct(|_| Ok(Console::stdio())),
    TypeDescriptor::class::<ArithmeticCalculator>(ARITHMETIC_CALCULATOR)
      .implements::<dyn Calculator, _>(|this| this)
      .construct(|_| Ok(ArithmeticCalculator::new())),
    TypeDescriptor::class::<CalculatorApp>(APP)
      .param(Parameter::contract("io", IO))
      .param(Parameter::contract("calculator", CALCULATOR))
      .construct(|args| {
        let io: Arc<dyn Io> = args.get("io")?;
        let calculator: Arc<dyn Calculator> = args.get("calculator")?;
        Ok(CalculatorApp::new(io, calculator))
      }),
  ])
}

/// The mapping used when no binding file is present.
///
/// `Io` is bound as a singleton on purpose so every consumer shares one
/// console; `Calculator` stays transient.
pub fn default_bindings(container: &Container) -> &Container {
  container
    .singleton(IO, CONSOLE)
    .bind(CALCULATOR, ARITHMETIC_CALCULATOR)
}

/// A container with every type registered, bound by `config` when given and
/// by [`default_bindings`] otherwise.
pub fn build_container(config: Option<&ContainerConfig>) -> Container {
  let container = Container::new();
  register_types(&container);
  match config {
    Some(config) => container.configure(config),
    None => default_bindings(&container),
  };
  container
}

/// Resolves the fully wired application.
pub fn resolve_app(container: &Container) -> Result<Arc<CalculatorApp>> {
  Ok(container.get::<CalculatorApp>(APP)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_bindings_share_the_console_only() {
    let container = build_container(None);

    assert!(container.is_singleton(IO));
    assert!(!container.is_singleton(CALCULATOR));

    let first = container.resolve(IO).unwrap();
    let second = container.resolve(IO).unwrap();
    assert!(billo_ioc::Object::ptr_eq(&first, &second));
    assert!(first.is::<dyn OutputWriter>());

    let a = container.get::<dyn Calculator>(CALCULATOR).unwrap();
    let b = container.get::<dyn Calculator>(CALCULATOR).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
  }

  #[test]
  fn interfaces_are_not_instantiable_without_bindings() {
    let container = Container::new();
    register_types(&container);

    assert!(matches!(
      container.resolve(APP),
      Err(billo_ioc::Error::TypeNotInstantiable { type_name }) if type_name == IO
    ));
  }
}
