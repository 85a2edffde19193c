use billo_ioc::{args, ArgumentBag, Container, ParamType, Parameter, TypeDescriptor};

struct Connection {
  dsn: String,
  pool_size: i64,
  label: Option<String>,
}

fn main() {
  let container = Container::new();
  container.register(
    TypeDescriptor::class::<Connection>("Connection")
      .param(Parameter::new("dsn", ParamType::Str))
      .param(Parameter::new("pool_size", ParamType::Int).default(4))
      .param(Parameter::new("label", ParamType::Str).nullable())
      .construct(|args| {
        Ok(Connection {
          dsn: args.get("dsn")?,
          pool_size: args.get("pool_size")?,
          label: args.get("label")?,
        })
      }),
  );

  // Named arguments, by parameter name.
  let named = container
    .get_with::<Connection, _>("Connection", [args! { dsn = "postgres://db" }])
    .unwrap();
  println!("named: {} (pool {}, label {:?})", named.dsn, named.pool_size, named.label);
  assert_eq!(named.pool_size, 4);
  assert_eq!(named.label, None);

  // Positional arguments fill parameters in declaration order.
  let positional = container
    .get_with::<Connection, _>("Connection", [args!["sqlite::memory:", 1, "cache"]])
    .unwrap();
  println!(
    "positional: {} (pool {}, label {:?})",
    positional.dsn, positional.pool_size, positional.label
  );

  // Several bags merge; the later one wins.
  let defaults = ArgumentBag::new().with("dsn", "mysql://primary").with("pool_size", 8);
  let overrides = ArgumentBag::new().with("pool_size", 16);
  let merged = container
    .get_with::<Connection, _>("Connection", [defaults, overrides])
    .unwrap();
  println!("merged: {} (pool {})", merged.dsn, merged.pool_size);
  assert_eq!(merged.pool_size, 16);
}
