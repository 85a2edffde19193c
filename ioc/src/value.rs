//! Dynamically typed values flowing through the container: argument values,
//! defaults, factory results and constructed objects.

use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type View = Box<dyn Any + Send + Sync>;

/// A shared, type-erased constructed instance.
///
/// An object holds one or more *views*: an `Arc<T>` for the concrete type and
/// an `Arc<dyn Trait>` for every interface it was registered as implementing.
/// Cloning an `Object` shares the same instance, so identity is preserved
/// across the cache and every consumer.
#[derive(Clone)]
pub struct Object {
  type_name: &'static str,
  views: Arc<Vec<View>>,
}

impl Object {
  /// Wraps a value, exposing it as `Arc<T>`.
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  /// Wraps an existing `Arc`, which may be a trait object.
  pub fn from_arc<T: ?Sized + Any + Send + Sync>(arc: Arc<T>) -> Self {
    Self::builder(arc).build()
  }

  /// Starts an object whose primary view is `arc`; more views can be added
  /// with [`ObjectBuilder::view`].
  pub fn builder<T: ?Sized + Any + Send + Sync>(arc: Arc<T>) -> ObjectBuilder {
    ObjectBuilder {
      type_name: type_name::<T>(),
      views: vec![Box::new(arc)],
    }
  }

  /// Returns the first view of type `Arc<T>`, if the object has one.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self
      .views
      .iter()
      .find_map(|view| view.downcast_ref::<Arc<T>>())
      .cloned()
  }

  pub fn is<T: ?Sized + Any + Send + Sync>(&self) -> bool {
    self.views.iter().any(|view| view.is::<Arc<T>>())
  }

  /// The type name of the primary view.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Returns `true` if both objects are the same instance.
  pub fn ptr_eq(a: &Object, b: &Object) -> bool {
    Arc::ptr_eq(&a.views, &b.views)
  }
}

impl fmt::Debug for Object {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Object({})", self.type_name)
  }
}

/// Collects the views of an [`Object`] before it is shared.
pub struct ObjectBuilder {
  type_name: &'static str,
  views: Vec<View>,
}

impl ObjectBuilder {
  pub fn view<I: ?Sized + Any + Send + Sync>(mut self, arc: Arc<I>) -> Self {
    self.views.push(Box::new(arc));
    self
  }

  pub fn build(self) -> Object {
    Object {
      type_name: self.type_name,
      views: Arc::new(self.views),
    }
  }
}

/// A constructor argument, default value or factory result.
#[derive(Debug, Clone, Default)]
pub enum Value {
  #[default]
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  Str(String),
  Object(Object),
}

impl Value {
  /// Wraps `value` as an object with a single concrete view.
  pub fn object<T: Any + Send + Sync>(value: T) -> Self {
    Value::Object(Object::new(value))
  }

  /// Short name of the variant, used in diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::Float(_) => "float",
      Value::Str(_) => "string",
      Value::Object(_) => "object",
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  pub fn as_object(&self) -> Option<&Object> {
    match self {
      Value::Object(object) => Some(object),
      _ => None,
    }
  }

  /// Converts into an object, handing the value back if it is not one.
  pub fn into_object(self) -> Result<Object, Value> {
    match self {
      Value::Object(object) => Ok(object),
      other => Err(other),
    }
  }
}

impl From<bool> for Value {
  fn from(v: bool) -> Self {
    Value::Bool(v)
  }
}

impl From<i32> for Value {
  fn from(v: i32) -> Self {
    Value::Int(v.into())
  }
}

impl From<i64> for Value {
  fn from(v: i64) -> Self {
    Value::Int(v)
  }
}

impl From<u32> for Value {
  fn from(v: u32) -> Self {
    Value::Int(v.into())
  }
}

impl From<f64> for Value {
  fn from(v: f64) -> Self {
    Value::Float(v)
  }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Value::Str(v.to_owned())
  }
}

impl From<String> for Value {
  fn from(v: String) -> Self {
    Value::Str(v)
  }
}

impl From<Object> for Value {
  fn from(v: Object) -> Self {
    Value::Object(v)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self {
    v.map_or(Value::Null, Into::into)
  }
}

/// Extraction of a typed value out of a [`Value`].
///
/// Implemented for the builtin scalar types, `Arc<T>` (including
/// `Arc<dyn Trait>`) via the object's views, and `Option<T>` which maps
/// `Value::Null` to `None`.
pub trait FromValue: Sized {
  fn from_value(value: &Value) -> Option<Self>;

  /// Description of the accepted value, used in mismatch errors.
  fn expected() -> Cow<'static, str>;
}

impl FromValue for Value {
  fn from_value(value: &Value) -> Option<Self> {
    Some(value.clone())
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed("any value")
  }
}

impl FromValue for Object {
  fn from_value(value: &Value) -> Option<Self> {
    value.as_object().cloned()
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed("object")
  }
}

impl FromValue for bool {
  fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Bool(v) => Some(*v),
      _ => None,
    }
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed("bool")
  }
}

impl FromValue for i64 {
  fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Int(v) => Some(*v),
      _ => None,
    }
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed("int")
  }
}

impl FromValue for u32 {
  fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Int(v) => u32::try_from(*v).ok(),
      _ => None,
    }
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed("non-negative int")
  }
}

// Integers widen to floats, the other direction is a mismatch.
impl FromValue for f64 {
  fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Float(v) => Some(*v),
      Value::Int(v) => Some(*v as f64),
      _ => None,
    }
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed("float")
  }
}

impl FromValue for String {
  fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Str(v) => Some(v.clone()),
      _ => None,
    }
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed("string")
  }
}

impl<T: ?Sized + Any + Send + Sync> FromValue for Arc<T> {
  fn from_value(value: &Value) -> Option<Self> {
    value.as_object().and_then(Object::downcast::<T>)
  }

  fn expected() -> Cow<'static, str> {
    Cow::Borrowed(type_name::<T>())
  }
}

impl<T: FromValue> FromValue for Option<T> {
  fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Null => Some(None),
      other => T::from_value(other).map(Some),
    }
  }

  fn expected() -> Cow<'static, str> {
    Cow::Owned(format!("optional {}", T::expected()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  trait Shape: Send + Sync {
    fn sides(&self) -> u32;
  }

  struct Square;
  impl Shape for Square {
    fn sides(&self) -> u32 {
      4
    }
  }

  #[test]
  fn object_exposes_all_registered_views() {
    let square = Arc::new(Square);
    let object = Object::builder(square.clone()).view::<dyn Shape>(square).build();

    assert!(object.is::<Square>());
    assert_eq!(object.downcast::<dyn Shape>().unwrap().sides(), 4);
    assert!(object.downcast::<String>().is_none());
    assert!(object.type_name().ends_with("Square"));
  }

  #[test]
  fn clones_share_identity() {
    let a = Object::new(Square);
    let b = a.clone();
    let c = Object::new(Square);

    assert!(Object::ptr_eq(&a, &b));
    assert!(!Object::ptr_eq(&a, &c));
    assert!(Arc::ptr_eq(
      &a.downcast::<Square>().unwrap(),
      &b.downcast::<Square>().unwrap()
    ));
  }

  #[test]
  fn scalar_extraction() {
    assert_eq!(i64::from_value(&Value::Int(3)), Some(3));
    assert_eq!(f64::from_value(&Value::Int(3)), Some(3.0));
    assert_eq!(i64::from_value(&Value::Float(3.0)), None);
    assert_eq!(u32::from_value(&Value::Int(-1)), None);
    assert_eq!(String::from_value(&"x".into()), Some("x".to_string()));
    assert_eq!(Option::<i64>::from_value(&Value::Null), Some(None));
    assert_eq!(Option::<i64>::from_value(&Value::Str("x".into())), None);
    assert_eq!(Option::<i64>::expected(), "optional int");
  }

  #[test]
  fn only_objects_are_objects() {
    assert!(Value::from(1).into_object().is_err());
    assert!(Value::object(Square).into_object().is_ok());
    assert_eq!(Value::from(None::<i64>).kind(), "null");
  }
}
