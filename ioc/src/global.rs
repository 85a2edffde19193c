//! The global IoC container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// The process-wide container, created on first access.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the global container instance.
///
/// Independent `Container`s can still be created with `Container::new()`;
/// the global one is a convenience for applications that want a single
/// registry reachable from anywhere.
///
/// # Examples
///
/// ```
/// use billo_ioc::{global, Object};
///
/// fn register_services() {
///   global()
///     .set("greeting", Object::new(String::from("Hello from global!")))
///     .unwrap();
/// }
/// # register_services();
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
