//! Tests for the `args!` and `resolve!` macros.
//!
//! Every contract registered on the global container uses a unique
//! `macro_test_` name, since tests in this binary share it.

use billo_ioc::{args, global, resolve, ArgumentBag, Object, ParamType, Parameter, TypeDescriptor, Value};
use std::sync::Arc;

// --- Test Fixtures ---

trait Shape: Send + Sync {
  fn area(&self) -> f64;
}

struct Rect {
  width: f64,
  height: f64,
}

impl Shape for Rect {
  fn area(&self) -> f64 {
    self.width * self.height
  }
}

fn register_rect(contract: &str) {
  global().register(
    TypeDescriptor::class::<Rect>(contract)
      .implements::<dyn Shape, _>(|this| this)
      .param(Parameter::new("width", ParamType::Float))
      .param(Parameter::new("height", ParamType::Float).default(1.0))
      .construct(|args| {
        Ok(Rect {
          width: args.get("width")?,
          height: args.get("height")?,
        })
      }),
  );
}

// --- args! ---

#[test]
fn test_args_empty() {
  let bag: ArgumentBag = args!();
  assert!(bag.is_empty());
}

#[test]
fn test_args_named_with_trailing_comma() {
  let bag = args! { host = "localhost", port = 8080, secure = true, };

  assert_eq!(bag.len(), 3);
  assert!(matches!(bag.named("host"), Some(Value::Str(s)) if s == "localhost"));
  assert!(matches!(bag.named("port"), Some(Value::Int(8080))));
  assert!(matches!(bag.named("secure"), Some(Value::Bool(true))));
  assert!(bag.positional(0).is_none());
}

#[test]
fn test_args_positional_keeps_order() {
  let bag = args![1, 2.5, "three", Object::new(4_u8)];

  assert!(matches!(bag.positional(0), Some(Value::Int(1))));
  assert!(matches!(bag.positional(1), Some(Value::Float(f)) if *f == 2.5));
  assert!(matches!(bag.positional(2), Some(Value::Str(s)) if s == "three"));
  assert!(bag.positional(3).and_then(Value::as_object).is_some());
  assert!(bag.named("0").is_none());
}

#[test]
fn test_args_can_be_extended_with_builder_methods() {
  let bag = args![10].with("mode", "fast").at(5, Value::Null);

  assert!(matches!(bag.positional(0), Some(Value::Int(10))));
  assert!(matches!(bag.positional(5), Some(Value::Null)));
  assert!(matches!(bag.named("mode"), Some(Value::Str(s)) if s == "fast"));
}

// --- resolve! ---

#[test]
fn test_resolve_concrete_with_positional_bag() {
  register_rect("macro_test_rect_positional");

  let rect = resolve!(Rect, "macro_test_rect_positional", args![3.0, 4.0]);

  assert_eq!(rect.width, 3.0);
  assert_eq!(rect.height, 4.0);
}

#[test]
fn test_resolve_trait_with_named_bag() {
  register_rect("macro_test_rect_named");
  global().bind("macro_test_shape", "macro_test_rect_named");

  let shape: Arc<dyn Shape> = resolve!(trait Shape, "macro_test_shape", args! { width = 2.5 });

  assert_eq!(shape.area(), 2.5);
}

#[test]
#[should_panic(expected = "Failed to resolve required service 'macro_test_rect_missing_width'")]
fn test_resolve_panics_on_unresolvable_parameter() {
  register_rect("macro_test_rect_missing_width");
  resolve!(Rect, "macro_test_rect_missing_width");
}

#[test]
#[should_panic(expected = "Failed to resolve required trait service 'macro_test_wrong_view'")]
fn test_resolve_trait_panics_on_missing_view() {
  global()
    .set("macro_test_wrong_view", Object::new(String::from("not a shape")))
    .unwrap();
  resolve!(trait Shape, "macro_test_wrong_view");
}
