use billo_ioc::{global, resolve, Parameter, TypeDescriptor};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  // --- Type Metadata ---
  global()
    .register(TypeDescriptor::interface("Logger"))
    .register(
      TypeDescriptor::class::<ConsoleLogger>("ConsoleLogger")
        .implements::<dyn Logger, _>(|this| this)
        .construct(|_| Ok(ConsoleLogger)),
    )
    .register(
      // ReportService never builds its logger; the container injects
      // whatever `Logger` is bound to.
      TypeDescriptor::class::<ReportService>("ReportService")
        .param(Parameter::contract("logger", "Logger"))
        .construct(|args| Ok(ReportService { logger: args.get("logger")? })),
    );

  // --- Registration ---
  global().singleton("Logger", "ConsoleLogger");

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!(ReportService, "ReportService");

  println!("Using the service...");
  report_service.generate_report();
}
