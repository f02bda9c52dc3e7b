// Basic calculator keypad
//
// A text buffer plus a flag telling whether the buffer holds the result of
// the last `=`. Evaluation goes through the restricted arithmetic grammar,
// so nothing other than numbers, the four operators, negation and
// parentheses is ever interpreted.

use crate::error::{AppError, AppResult, FormatError};
use log::{debug, warn};
use parser::{BinaryOp, Expr, UnaryOp};
use std::str::FromStr;

/// Display text after a failed evaluation
pub const ERROR_TEXT: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadState {
    Accumulating,
    PostResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    /// One of `+ - * /`
    Operator(char),
    Clear,
    Delete,
    Equals,
}

impl FromStr for Key {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "C" | "CE" => Key::Clear,
            "DEL" => Key::Delete,
            "=" => Key::Equals,
            "." => Key::Point,
            "+" => Key::Operator('+'),
            "-" | "−" => Key::Operator('-'),
            "*" | "×" => Key::Operator('*'),
            "/" | "÷" => Key::Operator('/'),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Key::Digit(c),
                    _ => return Err(FormatError::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

#[derive(Debug, Clone)]
pub struct Keypad {
    buffer: String,
    display: String,
    state: KeypadState,
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad::new()
    }
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            buffer: "0".to_string(),
            display: "0".to_string(),
            state: KeypadState::Accumulating,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// What the display shows; equal to the buffer except after a failed `=`
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn state(&self) -> KeypadState {
        self.state
    }

    /// Parse a button value (`data-value`) and press it
    pub fn press_str(&mut self, token: &str) -> Result<(), FormatError> {
        let key = token.parse()?;
        self.press(key);
        Ok(())
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => {
                self.buffer = "0".to_string();
                self.state = KeypadState::Accumulating;
            }
            Key::Delete => {
                self.buffer.pop();
                if self.buffer.is_empty() {
                    self.buffer.push('0');
                }
            }
            Key::Operator(op) => {
                self.buffer.push(' ');
                self.buffer.push(op);
                self.buffer.push(' ');
                self.state = KeypadState::Accumulating;
            }
            // Appends to a shown result too; the state is left alone
            Key::Point => {
                if !current_segment(&self.buffer).contains('.') {
                    self.buffer.push('.');
                }
            }
            Key::Digit(d) => {
                if self.state == KeypadState::PostResult || self.buffer == "0" {
                    self.buffer.clear();
                }
                self.buffer.push(d);
                self.state = KeypadState::Accumulating;
            }
            Key::Equals => {
                self.state = KeypadState::PostResult;
                match evaluate(&self.buffer) {
                    Ok(result) => {
                        debug!("keypad: {} = {}", self.buffer, result);
                        self.buffer = result;
                    }
                    Err(err) => {
                        warn!("keypad: cannot evaluate '{}': {}", self.buffer, err);
                        self.buffer = "0".to_string();
                        self.display = ERROR_TEXT.to_string();
                        return;
                    }
                }
            }
        }
        self.display = self.buffer.clone();
    }
}

/// Text after the last space, i.e. the number being typed
fn current_segment(buffer: &str) -> &str {
    buffer.rsplit(' ').next().unwrap_or(buffer)
}

/// Evaluate keypad text with the arithmetic grammar
pub fn evaluate(text: &str) -> AppResult<String> {
    let ast = parser::parse_arithmetic(text)
        .map_err(|errors| AppError::Engine(parser::error::summarize(&errors)))?;
    let value = fold(&ast)?;
    if !value.is_finite() {
        return Err(AppError::Engine("result is not a finite number".to_string()));
    }
    // No "-0" on the display
    let value = if value == 0.0 { 0.0 } else { value };
    Ok(value.to_string())
}

fn fold(expr: &Expr) -> AppResult<f64> {
    match expr {
        Expr::Number(text) => text
            .parse::<f64>()
            .map_err(|_| AppError::Engine(format!("invalid number '{}'", text))),
        Expr::Unary {
            op: UnaryOp::Negate,
            expr,
        } => Ok(-fold(expr)?),
        Expr::Binary { op, lhs, rhs } => {
            let (a, b) = (fold(lhs)?, fold(rhs)?);
            match op {
                BinaryOp::Add => Ok(a + b),
                BinaryOp::Sub => Ok(a - b),
                BinaryOp::Mul => Ok(a * b),
                BinaryOp::Div => Ok(a / b),
                BinaryOp::Pow => Err(unsupported(expr)),
            }
        }
        Expr::Identifier(_) | Expr::Call { .. } | Expr::List(_) => Err(unsupported(expr)),
    }
}

fn unsupported(expr: &Expr) -> AppError {
    AppError::Engine(format!("not an arithmetic expression: {:?}", expr))
}
