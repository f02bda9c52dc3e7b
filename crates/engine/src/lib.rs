pub mod calculus;
pub mod error;
pub mod eval;
pub mod expr;
pub mod matrix;
pub mod number;
pub mod solve;
pub mod value;

pub use error::{EngineError, EngineResult};
pub use expr::{Expr, Func};
pub use value::{Matrix, Value};

use eval::Evaluator;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// How determinants and inverses are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixEvalMethod {
    /// Cofactor expansion and adjugate; entries may contain symbols
    #[default]
    Symbolic,
    /// Exact Gaussian elimination; every entry must be a number
    Numeric,
}

impl FromStr for MatrixEvalMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "symbolic" => Ok(MatrixEvalMethod::Symbolic),
            "numeric" => Ok(MatrixEvalMethod::Numeric),
            other => Err(format!(
                "unknown matrix evaluation method '{}' (expected symbolic or numeric)",
                other
            )),
        }
    }
}

impl fmt::Display for MatrixEvalMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixEvalMethod::Symbolic => write!(f, "symbolic"),
            MatrixEvalMethod::Numeric => write!(f, "numeric"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub matrix_eval: MatrixEvalMethod,
}

/// Entry point: every operation takes expression text and returns a
/// canonical value.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    settings: EngineSettings,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Self {
        Engine { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn set_matrix_eval(&mut self, method: MatrixEvalMethod) {
        self.settings.matrix_eval = method;
    }

    /// Parse and evaluate a full expression (scalars, matrices, calls)
    pub fn evaluate(&self, source: &str) -> EngineResult<Value> {
        debug!("evaluate: {}", source);
        let ast = parse(source)?;
        self.evaluator().eval(&ast)
    }

    /// Canonical form of an expression. Evaluation already simplifies, so
    /// this is `evaluate` under the name the page uses.
    pub fn simplify(&self, source: &str) -> EngineResult<Value> {
        self.evaluate(source)
    }

    /// Evaluate to a scalar; a matrix result is an error
    pub fn scalar(&self, source: &str) -> EngineResult<Expr> {
        self.evaluate(source)?.into_scalar()
    }

    pub fn diff(&self, source: &str, var: &str) -> EngineResult<Expr> {
        check_variable(var)?;
        let target = self.scalar(source)?;
        calculus::differentiate(&target, var)
    }

    pub fn integrate(&self, source: &str, var: &str) -> EngineResult<Expr> {
        check_variable(var)?;
        let target = self.scalar(source)?;
        calculus::integrate(&target, var)
    }

    /// Solve a square linear system. Each entry is `lhs = rhs` or a bare
    /// expression meaning `= 0`. The solution is sorted by unknown name.
    pub fn solve_equations<S: AsRef<str>>(&self, equations: &[S]) -> EngineResult<Vec<(String, Expr)>> {
        let evaluator = self.evaluator();
        let residuals = equations
            .iter()
            .map(|source| {
                let source = source.as_ref();
                debug!("equation: {}", source);
                let equation = parser::parse_equation(source)
                    .map_err(|errors| EngineError::Parse(parser::error::summarize(&errors)))?;
                let lhs = evaluator.eval_scalar(&equation.lhs)?;
                let rhs = evaluator.eval_scalar(&equation.rhs)?;
                Ok(solve::residual(lhs, rhs))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        solve::solve_linear(&residuals)
    }

    /// Availability check: `det([[1]])` must be `1`
    pub fn self_test(&self) -> bool {
        matches!(self.scalar("det([[1]])"), Ok(e) if e.is_one())
    }

    fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.settings.matrix_eval)
    }
}

fn parse(source: &str) -> EngineResult<parser::Expr> {
    parser::parse_expression(source).map_err(|errors| EngineError::Parse(parser::error::summarize(&errors)))
}

fn check_variable(var: &str) -> EngineResult<()> {
    let mut chars = var.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidVariable(var.to_string()))
    }
}

#[cfg(test)]
mod tests;
