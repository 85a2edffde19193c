use billo_ioc::{Container, Value};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn tracker() -> billo_ioc::Result<Value> {
  Ok(Value::object(RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  }))
}

fn main() {
  let container = Container::new();

  // --- Singleton Registration ---
  // This factory will only be called ONCE.
  container.singleton_factory("singleton_tracker", |_, _| {
    println!("Creating SINGLETON RequestTracker...");
    tracker()
  });

  // --- Transient Registration ---
  // This factory will be called EVERY time the service is resolved.
  container.factory("transient_tracker", |_, _| {
    println!("Creating TRANSIENT RequestTracker...");
    tracker()
  });

  println!("--- Resolving Singletons ---");
  let s1 = container.get::<RequestTracker>("singleton_tracker").unwrap();
  let s2 = container.get::<RequestTracker>("singleton_tracker").unwrap();
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert_eq!(s2.id, 0);
  assert!(
    Arc::ptr_eq(&s1, &s2),
    "Singleton instances should be identical"
  );
  println!("Singleton instances are the same pointer, as expected.\n");

  println!("--- Resolving Transients ---");
  let t1 = container.get::<RequestTracker>("transient_tracker").unwrap();
  let t2 = container.get::<RequestTracker>("transient_tracker").unwrap();
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(
    !Arc::ptr_eq(&t1, &t2),
    "Transient instances should be different"
  );
  println!("Transient instances are different pointers, as expected.");
}
