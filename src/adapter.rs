// Math engine adapter
//
// The page's only way into the symbolic engine. Operands are embedded in
// expression strings exactly as the page formats them, and every engine
// failure becomes `AppError::Engine`. No preconditions are checked here.

use crate::error::AppResult;
use engine::{Engine, EngineSettings};

pub trait MathEngine {
    fn simplify(&self, expr: &str) -> AppResult<String>;
    fn differentiate(&self, expr: &str, var: &str) -> AppResult<String>;
    fn integrate(&self, expr: &str, var: &str) -> AppResult<String>;

    /// `(unknown, value)` pairs sorted by unknown
    fn solve_system(&self, equations: &[String]) -> AppResult<Vec<(String, String)>>;

    fn matrix_add(&self, a: &str, b: &str) -> AppResult<String>;
    fn matrix_multiply(&self, a: &str, b: &str) -> AppResult<String>;
    fn determinant(&self, a: &str) -> AppResult<String>;
    fn inverse(&self, a: &str) -> AppResult<String>;
}

#[derive(Debug, Clone, Default)]
pub struct SymbolicAdapter {
    engine: Engine,
}

impl SymbolicAdapter {
    pub fn new(settings: EngineSettings) -> Self {
        SymbolicAdapter {
            engine: Engine::new(settings),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn eval(&self, source: &str) -> AppResult<String> {
        Ok(self.engine.evaluate(source)?.to_string())
    }
}

impl MathEngine for SymbolicAdapter {
    fn simplify(&self, expr: &str) -> AppResult<String> {
        Ok(self.engine.simplify(expr)?.to_string())
    }

    fn differentiate(&self, expr: &str, var: &str) -> AppResult<String> {
        Ok(self.engine.diff(expr, var)?.to_string())
    }

    fn integrate(&self, expr: &str, var: &str) -> AppResult<String> {
        Ok(self.engine.integrate(expr, var)?.to_string())
    }

    fn solve_system(&self, equations: &[String]) -> AppResult<Vec<(String, String)>> {
        let solution = self.engine.solve_equations(equations)?;
        Ok(solution
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect())
    }

    fn matrix_add(&self, a: &str, b: &str) -> AppResult<String> {
        self.eval(&format!("({}) + ({})", a, b))
    }

    fn matrix_multiply(&self, a: &str, b: &str) -> AppResult<String> {
        self.eval(&format!("({}) * ({})", a, b))
    }

    fn determinant(&self, a: &str) -> AppResult<String> {
        self.eval(&format!("det({})", a))
    }

    fn inverse(&self, a: &str) -> AppResult<String> {
        self.eval(&format!("invert({})", a))
    }
}
