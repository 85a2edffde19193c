use billo_calc::app::{BANNER, FAILURE_MESSAGE, FAREWELL, REPEAT_PROMPT, TERM_PROMPT};
use billo_calc::wiring::{self, APP, CALCULATOR, IO};
use billo_calc::{CalcError, Calculator, InputReader, Io, OutputWriter};
use billo_ioc::{Container, Object, TypeDescriptor};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

// --- Test Fixtures ---

/// Feeds scripted lines and records a transcript of prompts and output.
struct ScriptedIo {
  input: Mutex<VecDeque<String>>,
  transcript: Mutex<Vec<String>>,
}

impl ScriptedIo {
  fn new(lines: &[&str]) -> Arc<Self> {
    Arc::new(Self {
      input: Mutex::new(lines.iter().map(|l| l.to_string()).collect()),
      transcript: Mutex::new(Vec::new()),
    })
  }

  fn transcript(&self) -> Vec<String> {
    self.transcript.lock().clone()
  }
}

impl OutputWriter for ScriptedIo {
  fn write(&self, text: &str) -> io::Result<()> {
    self.transcript.lock().push(text.to_string());
    Ok(())
  }

  fn write_line(&self, text: &str) -> io::Result<()> {
    self.transcript.lock().push(format!("{}\n", text));
    Ok(())
  }
}

impl InputReader for ScriptedIo {
  fn read_input(&self, prompt: Option<&str>) -> io::Result<Option<String>> {
    if let Some(prompt) = prompt {
      self.write(prompt)?;
    }
    Ok(self.input.lock().pop_front())
  }
}

struct FixedCalculator(f64);

impl Calculator for FixedCalculator {
  fn calculate(&self, _term: &str) -> Result<f64, CalcError> {
    Ok(self.0)
  }
}

fn container_with(io: &Arc<ScriptedIo>) -> Container {
  let container = wiring::build_container(None);
  let view: Arc<dyn Io> = io.clone();
  container
    .set(IO, Object::builder(Arc::clone(io)).view(view).build())
    .unwrap();
  container
}

fn repeat_prompt() -> String {
  format!("{}: [J/n] ", REPEAT_PROMPT)
}

// --- Tests ---

#[test]
fn test_session_evaluates_terms_until_declined() {
  let io = ScriptedIo::new(&["1 + 2 * 3", "j", "2 ^ 0,5 ^ 2", "", "1 / 0", "n"]);
  let container = container_with(&io);

  let app = wiring::resolve_app(&container).unwrap();
  app.run().unwrap();

  assert_eq!(
    io.transcript(),
    vec![
      format!("{}\n", BANNER),
      TERM_PROMPT.to_string(),
      "Ergebnis: 7\n".to_string(),
      repeat_prompt(),
      TERM_PROMPT.to_string(),
      format!("Ergebnis: {}\n", 2f64.powf(0.25)),
      repeat_prompt(),
      TERM_PROMPT.to_string(),
      format!("{}\n", FAILURE_MESSAGE),
      repeat_prompt(),
      format!("{}\n", FAREWELL),
    ]
  );
}

#[test]
fn test_session_ends_at_end_of_input() {
  let io = ScriptedIo::new(&["4 / 8"]);
  let container = container_with(&io);

  wiring::resolve_app(&container).unwrap().run().unwrap();

  let transcript = io.transcript();
  assert!(transcript.contains(&"Ergebnis: 0.5\n".to_string()));
  assert_eq!(transcript.last().unwrap(), &format!("{}\n", FAREWELL));
}

#[test]
fn test_invalid_answer_reprompts() {
  let io = ScriptedIo::new(&["1", "vielleicht", "nein"]);
  let container = container_with(&io);

  wiring::resolve_app(&container).unwrap().run().unwrap();

  let transcript = io.transcript();
  assert!(transcript.contains(&"Bitte 'j' oder 'n' eingeben.\n".to_string()));
  assert_eq!(transcript.iter().filter(|t| **t == repeat_prompt()).count(), 2);
}

#[test]
fn test_runaway_nesting_is_reported_as_a_failed_term() {
  let deep = "(".repeat(200_000);
  let io = ScriptedIo::new(&[&deep, "n"]);
  let container = container_with(&io);

  wiring::resolve_app(&container).unwrap().run().unwrap();

  let transcript = io.transcript();
  assert!(transcript.contains(&format!("{}\n", FAILURE_MESSAGE)));
  assert_eq!(transcript.last().unwrap(), &format!("{}\n", FAREWELL));
}

#[test]
fn test_calculator_contract_can_be_rebound() {
  let io = ScriptedIo::new(&["whatever", "n"]);
  let container = container_with(&io);
  container.register(
    TypeDescriptor::class::<FixedCalculator>("FixedCalculator")
      .implements::<dyn Calculator, _>(|this| this)
      .construct(|_| Ok(FixedCalculator(42.0))),
  );
  container.bind(CALCULATOR, "FixedCalculator");

  wiring::resolve_app(&container).unwrap().run().unwrap();

  assert!(io.transcript().contains(&"Ergebnis: 42\n".to_string()));
}

#[test]
fn test_app_shares_the_singleton_console() {
  let io = ScriptedIo::new(&[]);
  let container = container_with(&io);

  let _first = container.resolve(APP).unwrap();
  let _second = container.resolve(APP).unwrap();
  let console = container.get::<dyn Io>(IO).unwrap();

  assert!(Object::ptr_eq(
    &container.resolve(IO).unwrap(),
    &container.resolve(IO).unwrap()
  ));
  console.write_line("direct").unwrap();
  assert_eq!(io.transcript(), vec!["direct\n".to_string()]);
}
