//! Public macros for ergonomic argument bags and service resolution.

/// Builds an [`ArgumentBag`](crate::ArgumentBag).
///
/// Either all entries are named (`name = value`) or all are positional.
/// Mixed bags can be built with the `ArgumentBag` methods directly.
///
/// # Examples
///
/// ```
/// use billo_ioc::{args, Value};
///
/// let named = args! { dsn = "sqlite::memory:", pool_size = 4 };
/// assert!(matches!(named.named("pool_size"), Some(Value::Int(4))));
///
/// let positional = args![123, "x"];
/// assert!(matches!(positional.positional(1), Some(Value::Str(s)) if s == "x"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::ArgumentBag::new()
    };

    ($($name:ident = $value:expr),+ $(,)?) => {
        $crate::ArgumentBag::new()
            $(.with(stringify!($name), $value))+
    };

    ($($value:expr),+ $(,)?) => {
        $crate::ArgumentBag::new()
            $(.push($value))+
    };
}

/// Resolves a service from the global container.
///
/// It panics if the contract cannot be resolved or the resolved object has
/// no view of the requested type. For a non-panicking version, use
/// `global().get(...)` directly.
///
/// # Panics
///
/// On any resolution error.
///
/// # Examples
///
/// ```
/// use billo_ioc::{global, resolve, Object};
///
/// global().set("motd", Object::new(String::from("hello"))).unwrap();
///
/// let message = resolve!(String, "motd");
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use billo_ioc::{global, resolve, Object};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let greeter: Arc<dyn Greeter> = Arc::new(EnglishGreeter);
/// global().set("greeter", Object::from_arc(greeter)).unwrap();
///
/// let greeter = resolve!(trait Greeter, "greeter");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
    // resolve!(trait MyTrait, "contract")
    (trait $trait_ident:ident, $contract:expr) => {
        $crate::global()
            .get::<dyn $trait_ident>($contract)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service '{}': {}",
                    $contract, err
                )
            })
    };

    // resolve!(trait MyTrait, "contract", bag)
    (trait $trait_ident:ident, $contract:expr, $args:expr) => {
        $crate::global()
            .get_with::<dyn $trait_ident, _>($contract, [$args])
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service '{}': {}",
                    $contract, err
                )
            })
    };

    // resolve!(MyService, "contract")
    ($type:ty, $contract:expr) => {
        $crate::global()
            .get::<$type>($contract)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required service '{}': {}",
                    $contract, err
                )
            })
    };

    // resolve!(MyService, "contract", bag)
    ($type:ty, $contract:expr, $args:expr) => {
        $crate::global()
            .get_with::<$type, _>($contract, [$args])
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required service '{}': {}",
                    $contract, err
                )
            })
    };
}
