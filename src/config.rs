// Page configuration
//
// Built from CLI flags (or defaults in the browser) and handed to `App::new`.

use crate::error::FormatError;
use engine::{EngineSettings, MatrixEvalMethod};

/// Largest matrix side offered by the dimension selectors
pub const DEFAULT_MAX_DIMENSION: usize = 5;

/// Hard upper bound accepted for `max_dimension`
pub const DIMENSION_LIMIT: usize = 10;

/// Variable used by integrate/differentiate when the field is empty
pub const DEFAULT_VARIABLE: &str = "x";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub matrix_eval: MatrixEvalMethod,
    pub max_dimension: usize,
    pub default_variable: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            matrix_eval: MatrixEvalMethod::Symbolic,
            max_dimension: DEFAULT_MAX_DIMENSION,
            default_variable: DEFAULT_VARIABLE.to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), FormatError> {
        if !(1..=DIMENSION_LIMIT).contains(&self.max_dimension) {
            return Err(FormatError::OutOfRange {
                what: "max dimension",
                value: self.max_dimension,
                min: 1,
                max: DIMENSION_LIMIT,
            });
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            matrix_eval: self.matrix_eval,
        }
    }
}
