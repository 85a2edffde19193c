//! Arithmetic term evaluation.

use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;
use tracing::trace;

/// Bound on nested parentheses, signs and exponents.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
  #[error("The term is empty")]
  Empty,

  #[error("Unexpected '{found}' at position {position}")]
  UnexpectedChar { found: char, position: usize },

  #[error("The term ends unexpectedly")]
  UnexpectedEnd,

  #[error("Invalid number '{0}'")]
  InvalidNumber(String),

  #[error("The term is nested too deeply")]
  TooDeeplyNested,

  #[error("Division by zero")]
  DivisionByZero,

  #[error("The result is not a finite number")]
  NotFinite,
}

pub trait Calculator: Send + Sync {
  fn calculate(&self, term: &str) -> Result<f64, CalcError>;
}

/// Evaluates `+ - * / ^` with the usual precedence, parentheses and unary
/// signs. `^` is right-associative and binds tighter than a leading sign,
/// so `-2^2` is `-4`. Decimals may use `.` or `,`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithmeticCalculator;

impl ArithmeticCalculator {
  pub fn new() -> Self {
    Self
  }
}

impl Calculator for ArithmeticCalculator {
  fn calculate(&self, term: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(term)?;
    if tokens.is_empty() {
      return Err(CalcError::Empty);
    }

    let mut parser = Parser {
      tokens: &tokens,
      cursor: 0,
      depth: 0,
    };
    let result = parser.expression()?;
    if let Some(token) = parser.peek() {
      return Err(token.unexpected());
    }
    if !result.is_finite() {
      return Err(CalcError::NotFinite);
    }
    trace!(term, result, "term evaluated");
    Ok(result)
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Symbol {
  Number(f64),
  Operator(char),
  Open,
  Close,
}

#[derive(Debug, Clone, Copy)]
struct Token {
  symbol: Symbol,
  found: char,
  position: usize,
}

impl Token {
  fn unexpected(&self) -> CalcError {
    CalcError::UnexpectedChar {
      found: self.found,
      position: self.position,
    }
  }
}

fn tokenize(term: &str) -> Result<Vec<Token>, CalcError> {
  let mut chars = term.char_indices().peekable();
  let mut tokens = Vec::new();

  while let Some(&(position, found)) = chars.peek() {
    let symbol = match found {
      c if c.is_whitespace() => {
        chars.next();
        continue;
      }
      c if c.is_ascii_digit() || c == '.' || c == ',' => Symbol::Number(number(&mut chars)?),
      '+' | '-' | '*' | '/' | '^' => {
        chars.next();
        Symbol::Operator(found)
      }
      '(' => {
        chars.next();
        Symbol::Open
      }
      ')' => {
        chars.next();
        Symbol::Close
      }
      _ => return Err(CalcError::UnexpectedChar { found, position }),
    };
    tokens.push(Token { symbol, found, position });
  }

  Ok(tokens)
}

fn number(chars: &mut Peekable<CharIndices<'_>>) -> Result<f64, CalcError> {
  let mut literal = String::new();
  while let Some(&(_, c)) = chars.peek() {
    match c {
      '0'..='9' => literal.push(c),
      '.' | ',' => literal.push('.'),
      _ => break,
    }
    chars.next();
  }

  let has_digit = literal.bytes().any(|b| b.is_ascii_digit());
  if !has_digit || literal.matches('.').count() > 1 {
    return Err(CalcError::InvalidNumber(literal));
  }
  literal.parse().map_err(|_| CalcError::InvalidNumber(literal))
}

struct Parser<'a> {
  tokens: &'a [Token],
  cursor: usize,
  depth: usize,
}

impl Parser<'_> {
  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.cursor)
  }

  fn next(&mut self) -> Result<Token, CalcError> {
    let token = *self.tokens.get(self.cursor).ok_or(CalcError::UnexpectedEnd)?;
    self.cursor += 1;
    Ok(token)
  }

  fn next_operator(&mut self, operators: &[char]) -> Option<char> {
    match self.peek()?.symbol {
      Symbol::Operator(op) if operators.contains(&op) => {
        self.cursor += 1;
        Some(op)
      }
      _ => None,
    }
  }

  // expression := product (('+' | '-') product)*
  fn expression(&mut self) -> Result<f64, CalcError> {
    let mut value = self.product()?;
    while let Some(op) = self.next_operator(&['+', '-']) {
      let rhs = self.product()?;
      value = if op == '+' { value + rhs } else { value - rhs };
    }
    Ok(value)
  }

  // product := unary (('*' | '/') unary)*
  fn product(&mut self) -> Result<f64, CalcError> {
    let mut value = self.unary()?;
    while let Some(op) = self.next_operator(&['*', '/']) {
      let rhs = self.unary()?;
      if op == '*' {
        value *= rhs;
      } else if rhs == 0.0 {
        return Err(CalcError::DivisionByZero);
      } else {
        value /= rhs;
      }
    }
    Ok(value)
  }

  // Every recursive path (parentheses, signs, exponents) passes through here.
  fn unary(&mut self) -> Result<f64, CalcError> {
    if self.depth >= MAX_DEPTH {
      return Err(CalcError::TooDeeplyNested);
    }
    self.depth += 1;
    let value = self.signed();
    self.depth -= 1;
    value
  }

  // unary := ('+' | '-') unary | power
  fn signed(&mut self) -> Result<f64, CalcError> {
    match self.next_operator(&['+', '-']) {
      Some('-') => Ok(-self.unary()?),
      Some(_) => self.unary(),
      None => self.power(),
    }
  }

  // power := primary ('^' unary)?
  fn power(&mut self) -> Result<f64, CalcError> {
    let base = self.primary()?;
    if self.next_operator(&['^']).is_some() {
      let exponent = self.unary()?;
      return Ok(base.powf(exponent));
    }
    Ok(base)
  }

  // primary := number | '(' expression ')'
  fn primary(&mut self) -> Result<f64, CalcError> {
    let token = self.next()?;
    match token.symbol {
      Symbol::Number(value) => Ok(value),
      Symbol::Open => {
        let value = self.expression()?;
        let close = self.next()?;
        if close.symbol != Symbol::Close {
          return Err(close.unexpected());
        }
        Ok(value)
      }
      _ => Err(token.unexpected()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn calc(term: &str) -> Result<f64, CalcError> {
    ArithmeticCalculator::new().calculate(term)
  }

  #[test]
  fn honours_precedence_and_associativity() {
    assert_eq!(calc("1 + 2 * 3").unwrap(), 7.0);
    assert_eq!(calc("(1 + 2) * 3").unwrap(), 9.0);
    assert_eq!(calc("10 - 4 - 3").unwrap(), 3.0);
    assert_eq!(calc("2 ^ 3 ^ 2").unwrap(), 512.0);
    assert_eq!(calc("-2^2").unwrap(), -4.0);
    assert_eq!(calc("2^-1").unwrap(), 0.5);
    assert_eq!(calc("8 / 4 / 2").unwrap(), 1.0);
  }

  #[test]
  fn accepts_both_decimal_separators_and_signs() {
    assert_eq!(calc("1,5 + 1.5").unwrap(), 3.0);
    assert_eq!(calc(".5 * 4").unwrap(), 2.0);
    assert_eq!(calc("--3").unwrap(), 3.0);
    assert_eq!(calc("+3 - -2").unwrap(), 5.0);
  }

  #[test]
  fn rejects_malformed_terms() {
    assert_eq!(calc("   "), Err(CalcError::Empty));
    assert_eq!(calc("1 +"), Err(CalcError::UnexpectedEnd));
    assert_eq!(calc("(1 + 2"), Err(CalcError::UnexpectedEnd));
    assert_eq!(
      calc("2 x 3"),
      Err(CalcError::UnexpectedChar { found: 'x', position: 2 })
    );
    assert_eq!(
      calc("1 + 2)"),
      Err(CalcError::UnexpectedChar { found: ')', position: 5 })
    );
    assert_eq!(calc("1.2.3"), Err(CalcError::InvalidNumber("1.2.3".to_string())));
    assert_eq!(calc("* 2"), Err(CalcError::UnexpectedChar { found: '*', position: 0 }));
  }

  #[test]
  fn rejects_runaway_nesting() {
    assert_eq!(calc(&"(".repeat(100_000)), Err(CalcError::TooDeeplyNested));
    assert_eq!(calc(&format!("{}1", "-".repeat(100_000))), Err(CalcError::TooDeeplyNested));
    assert_eq!(
      calc(&format!("1{}", "^1".repeat(100_000))),
      Err(CalcError::TooDeeplyNested)
    );

    let nested = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(calc(&nested).unwrap(), 1.0);
  }

  #[test]
  fn rejects_division_by_zero_and_overflow() {
    assert_eq!(calc("1 / (2 - 2)"), Err(CalcError::DivisionByZero));
    assert_eq!(calc("10 ^ 400"), Err(CalcError::NotFinite));
    assert_eq!(calc("(-8) ^ 0.5"), Err(CalcError::NotFinite));
  }
}
