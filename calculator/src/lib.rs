//! # Billo Calc
//!
//! An interactive console calculator whose object graph is wired by
//! [`billo_ioc`]. The console and the evaluator are consumed through the
//! `Io` and `Calculator` contracts, so either can be rebound from a
//! `billo.yaml` binding file or replaced in tests.

pub mod app;
pub mod calculator;
pub mod error;
pub mod io;
pub mod logging;
pub mod settings;
pub mod wiring;

pub use app::CalculatorApp;
pub use calculator::{ArithmeticCalculator, CalcError, Calculator};
pub use error::{AppError, Result};
pub use io::{Console, InputReader, Io, OutputWriter};
