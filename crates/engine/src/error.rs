// Error handling for the symbolic engine
//
// Every failure the engine reports to its callers. The page treats all of
// them as one opaque category and only shows the message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Input text did not parse; carries a one-line description
    #[error("{0}")]
    Parse(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), found {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("invalid variable name '{0}'")]
    InvalidVariable(String),

    /// No rule applies (integration, irrational coefficients, ...)
    #[error("{0}")]
    Unsupported(String),

    #[error("equation {0} = 0 is not linear")]
    NonLinear(String),

    #[error("system has {equations} equation(s) in {unknowns} unknown(s)")]
    SystemShape { equations: usize, unknowns: usize },

    #[error("no unique solution")]
    NoUniqueSolution,

    #[error("matrix is singular")]
    Singular,

    #[error("matrix must be square, found {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("dimension mismatch: {0}")]
    ShapeMismatch(String),

    #[error("expected a scalar expression, found a matrix")]
    ExpectedScalar,

    #[error("expected a matrix")]
    ExpectedMatrix,

    #[error("matrix entry '{0}' is not numeric")]
    NonNumericEntry(String),
}

/// Convenient Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
