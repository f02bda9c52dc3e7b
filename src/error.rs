// Error handling for the calculator page
//
// Two categories reach the result regions: precondition failures detected
// before the engine is called, and anything the engine (or the keypad
// evaluator) rejects.

use engine::EngineError;
use thiserror::Error;

/// Invalid page state, raised before any engine call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Please enter at least one equation.")]
    NoEquations,

    #[error("expected {expected} equation(s), found {found}")]
    EquationCount { expected: usize, found: usize },

    #[error("{what} must be between {min} and {max}, got {value}")]
    OutOfRange {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("{what} is not a number: '{text}'")]
    NotANumber { what: &'static str, text: String },

    #[error("malformed matrix: {0}")]
    MalformedMatrix(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    Format(#[from] FormatError),

    /// Engine or keypad evaluation failure, message only
    #[error("{0}")]
    Engine(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Engine(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
