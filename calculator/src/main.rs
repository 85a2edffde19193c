use billo_calc::{logging, settings, wiring, Result};
use std::process::ExitCode;

fn run() -> Result<()> {
  logging::init()?;

  let config = settings::load_config()?;
  let container = wiring::build_container(config.as_ref());
  let app = wiring::resolve_app(&container)?;
  app.run()?;
  Ok(())
}

fn main() -> ExitCode {
  match run() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("billo-calc: {}", e);
      ExitCode::FAILURE
    }
  }
}
