//! Line-oriented console input and output.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::io::{self, BufRead, BufReader, Write};

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("valid integer pattern"));
static NUMBER: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$").expect("valid number pattern")
});

const AFFIRMATIVE: [&str; 4] = ["j", "ja", "y", "yes"];
const NEGATIVE: [&str; 3] = ["n", "nein", "no"];

pub trait OutputWriter: Send + Sync {
  fn write(&self, text: &str) -> io::Result<()>;

  fn write_line(&self, text: &str) -> io::Result<()>;
}

/// Reads lines with an optional prompt, plus typed convenience readers that
/// re-prompt until the input is valid.
///
/// At end of input the typed readers return their default, or fail with
/// `io::ErrorKind::UnexpectedEof` when there is none.
pub trait InputReader: OutputWriter {
  /// Writes `prompt` (if any) and reads one line without its line ending.
  /// Returns `None` at end of input.
  fn read_input(&self, prompt: Option<&str>) -> io::Result<Option<String>>;

  /// Like [`read_input`](Self::read_input), but end of input reads as an
  /// empty line.
  fn read_line(&self, prompt: Option<&str>) -> io::Result<String> {
    Ok(self.read_input(prompt)?.unwrap_or_default())
  }

  fn read_int(&self, prompt: Option<&str>, default: Option<i64>) -> io::Result<i64> {
    loop {
      let Some(line) = self.read_input(prompt)? else {
        return default.ok_or_else(end_of_input);
      };
      if line.is_empty() {
        if let Some(default) = default {
          return Ok(default);
        }
      }
      if INTEGER.is_match(&line) {
        if let Ok(value) = line.parse() {
          return Ok(value);
        }
      }
      self.write_line("Bitte eine ganze Zahl eingeben.")?;
    }
  }

  /// Accepts `,` as well as `.` as the decimal separator.
  fn read_float(&self, prompt: Option<&str>, default: Option<f64>) -> io::Result<f64> {
    loop {
      let Some(line) = self.read_input(prompt)? else {
        return default.ok_or_else(end_of_input);
      };
      if line.is_empty() {
        if let Some(default) = default {
          return Ok(default);
        }
      }
      let normalized = line.replace(',', ".");
      if NUMBER.is_match(&normalized) {
        if let Ok(value) = normalized.trim().parse() {
          return Ok(value);
        }
      }
      self.write_line("Bitte eine Zahl eingeben (z.B. 3.14).")?;
    }
  }

  fn read_yes_no(&self, prompt: &str, default: bool) -> io::Result<bool> {
    let suffix = if default { ": [J/n] " } else { ": [j/N] " };
    let prompt = format!("{}{}", prompt, suffix);
    loop {
      let Some(line) = self.read_input(Some(&prompt))? else {
        return Ok(default);
      };
      let answer = line.trim().to_lowercase();
      if answer.is_empty() {
        return Ok(default);
      }
      if AFFIRMATIVE.contains(&answer.as_str()) {
        return Ok(true);
      }
      if NEGATIVE.contains(&answer.as_str()) {
        return Ok(false);
      }
      self.write_line("Bitte 'j' oder 'n' eingeben.")?;
    }
  }
}

/// The combined console contract.
pub trait Io: InputReader {}

impl<T: InputReader + ?Sized> Io for T {}

fn end_of_input() -> io::Error {
  io::Error::new(io::ErrorKind::UnexpectedEof, "end of input")
}

/// An [`Io`] over any reader/writer pair, stdin/stdout by default.
pub struct Console {
  reader: Mutex<Box<dyn BufRead + Send>>,
  writer: Mutex<Box<dyn Write + Send>>,
}

impl Console {
  pub fn new(reader: impl BufRead + Send + 'static, writer: impl Write + Send + 'static) -> Self {
    Self {
      reader: Mutex::new(Box::new(reader)),
      writer: Mutex::new(Box::new(writer)),
    }
  }

  pub fn stdio() -> Self {
    Self::new(BufReader::new(io::stdin()), io::stdout())
  }
}

impl Default for Console {
  fn default() -> Self {
    Self::stdio()
  }
}

impl OutputWriter for Console {
  fn write(&self, text: &str) -> io::Result<()> {
    let mut writer = self.writer.lock();
    writer.write_all(text.as_bytes())?;
    writer.flush()
  }

  fn write_line(&self, text: &str) -> io::Result<()> {
    let mut writer = self.writer.lock();
    writeln!(writer, "{}", text)?;
    writer.flush()
  }
}

impl InputReader for Console {
  fn read_input(&self, prompt: Option<&str>) -> io::Result<Option<String>> {
    if let Some(prompt) = prompt {
      self.write(prompt)?;
    }

    let mut line = String::new();
    if self.reader.lock().read_line(&mut line)? == 0 {
      return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
  }
}
