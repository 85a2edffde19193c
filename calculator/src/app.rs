use crate::calculator::Calculator;
use crate::io::Io;
use std::io;
use std::sync::Arc;
use tracing::debug;

pub const BANNER: &str = "=== Rust Console - Calculator ===";
pub const TERM_PROMPT: &str = "Bitte gib deine Term jetzt ein: ";
pub const FAILURE_MESSAGE: &str = "Der Term konnte leider nicht berechnet werden.";
pub const REPEAT_PROMPT: &str = "Möchtest du einen weiteren Term berechnen?";
pub const FAREWELL: &str = "Bis zum nächsten Mal!";

/// The interactive read-evaluate loop. Both collaborators are autowired.
pub struct CalculatorApp {
  io: Arc<dyn Io>,
  calculator: Arc<dyn Calculator>,
}

impl CalculatorApp {
  pub fn new(io: Arc<dyn Io>, calculator: Arc<dyn Calculator>) -> Self {
    Self { io, calculator }
  }

  /// Runs until the user declines another term or the input ends.
  pub fn run(&self) -> io::Result<()> {
    self.io.write_line(BANNER)?;

    loop {
      let Some(term) = self.io.read_input(Some(TERM_PROMPT))? else {
        break;
      };

      match self.calculator.calculate(&term) {
        Ok(result) => self.io.write_line(&format!("Ergebnis: {}", result))?,
        Err(e) => {
          debug!(term = %term, error = %e, "term could not be evaluated");
          self.io.write_line(FAILURE_MESSAGE)?;
        }
      }

      if !self.io.read_yes_no(REPEAT_PROMPT, true)? {
        break;
      }
    }

    self.io.write_line(FAREWELL)
  }
}
