// Event dispatch
//
// `App` owns the keypad state, the settings and the engine adapter. Each
// event is routed by element id to the tab controller or one of the panel
// handlers, and every failure ends in the panel's result region.

use crate::adapter::{MathEngine, SymbolicAdapter};
use crate::config::Settings;
use crate::dom::Dom;
use crate::error::{AppResult, FormatError};
use crate::format;
use crate::forms;
use crate::keypad::Keypad;
use crate::layout::{self, MATRIX_NAMES};
use crate::presenter::{show_error, show_result};
use crate::tabs::{self, Panel};
use log::{debug, warn};

pub const KEYPAD_DISPLAY: &str = "simple-display";
pub const CALC_INPUT: &str = "calcInput";
pub const CALC_VARIABLE: &str = "calcVariable";
pub const CALC_RESULT: &str = "calcResult";
pub const VAR_COUNT: &str = "varCount";
pub const SOLVER_RESULT: &str = "solverResult";
pub const MATRIX_RESULT: &str = "matrixResult";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Click(String),
    Change(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolicOp {
    Simplify,
    Integrate,
    Differentiate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatrixOp {
    Add,
    Multiply,
    Determinant,
    Inverse,
}

pub struct App<E: MathEngine = SymbolicAdapter> {
    settings: Settings,
    engine: E,
    keypad: Keypad,
}

impl App<SymbolicAdapter> {
    pub fn new(settings: Settings) -> Self {
        let engine = SymbolicAdapter::new(settings.engine_settings());
        App::with_engine(settings, engine)
    }
}

impl<E: MathEngine> App<E> {
    pub fn with_engine(settings: Settings, engine: E) -> Self {
        App {
            settings,
            engine,
            keypad: Keypad::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Bring a freshly loaded page to its initial state
    pub fn mount(&mut self, dom: &mut dyn Dom) {
        tabs::show_tab(dom, Panel::Basic);
        dom.set_text(KEYPAD_DISPLAY, self.keypad.display());
    }

    pub fn handle(&mut self, dom: &mut dyn Dom, event: &Event) {
        debug!("event: {:?}", event);
        match event {
            Event::Click(id) => self.click(dom, id),
            Event::Change(id) => self.change(dom, id),
        }
    }

    fn click(&mut self, dom: &mut dyn Dom, id: &str) {
        if dom.has_class(id, tabs::BUTTON_CLASS) {
            let target = dom.attr(id, "data-tab").unwrap_or_default();
            match target.parse::<Panel>() {
                Ok(panel) => tabs::show_tab(dom, panel),
                Err(err) => warn!("{}", err),
            }
            return;
        }

        if dom.has_class(id, "calc-btn") {
            let value = dom.attr(id, "data-value").unwrap_or_default();
            self.press_key(dom, &value);
            return;
        }

        match id {
            "btnSimplify" => self.symbolic(dom, SymbolicOp::Simplify),
            "btnIntegrate" => self.symbolic(dom, SymbolicOp::Integrate),
            "btnDifferentiate" => self.symbolic(dom, SymbolicOp::Differentiate),
            "btnSolveSystem" => {
                let result = self.solve(dom);
                self.present(dom, SOLVER_RESULT, result);
            }
            "btnMatrixAdd" => self.matrix(dom, MatrixOp::Add),
            "btnMatrixMultiply" => self.matrix(dom, MatrixOp::Multiply),
            "btnMatrixDetA" => self.matrix(dom, MatrixOp::Determinant),
            "btnMatrixInvA" => self.matrix(dom, MatrixOp::Inverse),
            _ => debug!("no handler for click on '{}'", id),
        }
    }

    fn change(&mut self, dom: &mut dyn Dom, id: &str) {
        if id == VAR_COUNT {
            let result = forms::read_dimension(dom, VAR_COUNT, "variable count")
                .and_then(|count| forms::regenerate_equations(dom, count));
            if let Err(err) = result {
                show_error(dom, SOLVER_RESULT, &err.into());
            }
            return;
        }

        let grid = MATRIX_NAMES
            .iter()
            .find(|name| id == layout::rows_selector(name) || id == layout::cols_selector(name));
        match grid {
            Some(name) => {
                let max = self.settings.max_dimension;
                let result = read_shape(dom, name)
                    .and_then(|(rows, cols)| forms::regenerate_matrix(dom, name, rows, cols, max));
                if let Err(err) = result {
                    show_error(dom, MATRIX_RESULT, &err.into());
                }
            }
            None => debug!("no handler for change on '{}'", id),
        }
    }

    fn press_key(&mut self, dom: &mut dyn Dom, value: &str) {
        if let Err(err) = self.keypad.press_str(value) {
            warn!("{}", err);
            return;
        }
        dom.set_text(KEYPAD_DISPLAY, self.keypad.display());
    }

    fn symbolic(&mut self, dom: &mut dyn Dom, op: SymbolicOp) {
        let expr = dom.value(CALC_INPUT).unwrap_or_default();
        let var = dom.value(CALC_VARIABLE).unwrap_or_default();
        let var = match var.trim() {
            "" => self.settings.default_variable.clone(),
            v => v.to_string(),
        };

        let result = match op {
            SymbolicOp::Simplify => self.engine.simplify(&expr),
            SymbolicOp::Integrate => self.engine.integrate(&expr, &var),
            SymbolicOp::Differentiate => self.engine.differentiate(&expr, &var),
        };
        self.present(dom, CALC_RESULT, result);
    }

    fn solve(&self, dom: &dyn Dom) -> AppResult<String> {
        let count = forms::read_dimension(dom, VAR_COUNT, "variable count")?;
        let equations = format::collect_equations(&forms::read_equations(dom));
        if equations.is_empty() {
            return Err(FormatError::NoEquations.into());
        }
        if equations.len() != count {
            return Err(FormatError::EquationCount {
                expected: count,
                found: equations.len(),
            }
            .into());
        }

        let solution = self.engine.solve_system(&equations)?;
        Ok(format::format_solution(&solution))
    }

    fn matrix(&mut self, dom: &mut dyn Dom, op: MatrixOp) {
        let result = self.matrix_result(dom, op);
        self.present(dom, MATRIX_RESULT, result);
    }

    fn matrix_result(&self, dom: &dyn Dom, op: MatrixOp) -> AppResult<String> {
        let a = read_matrix_text(dom, "matrixA")?;
        match op {
            MatrixOp::Add => self.engine.matrix_add(&a.text, &read_matrix_text(dom, "matrixB")?.text),
            MatrixOp::Multiply => {
                self.engine
                    .matrix_multiply(&a.text, &read_matrix_text(dom, "matrixB")?.text)
            }
            MatrixOp::Determinant => {
                a.require_square()?;
                self.engine.determinant(&a.text)
            }
            MatrixOp::Inverse => {
                a.require_square()?;
                self.engine.inverse(&a.text)
            }
        }
    }

    fn present(&self, dom: &mut dyn Dom, region: &str, result: AppResult<String>) {
        match result {
            Ok(text) => show_result(dom, region, &text),
            Err(err) => show_error(dom, region, &err),
        }
    }
}

/// A grid formatted for the engine, with its shape
struct MatrixText {
    text: String,
    rows: usize,
    cols: usize,
}

impl MatrixText {
    fn require_square(&self) -> Result<(), FormatError> {
        if self.rows == self.cols {
            Ok(())
        } else {
            Err(FormatError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

fn read_shape(dom: &dyn Dom, name: &str) -> Result<(usize, usize), FormatError> {
    let rows = forms::read_dimension(dom, &layout::rows_selector(name), "rows")?;
    let cols = forms::read_dimension(dom, &layout::cols_selector(name), "columns")?;
    Ok((rows, cols))
}

fn read_matrix_text(dom: &dyn Dom, name: &str) -> Result<MatrixText, FormatError> {
    let (rows, cols) = read_shape(dom, name)?;
    let cells = forms::read_grid(dom, name, rows, cols);
    Ok(MatrixText {
        text: format::format_matrix(&cells, rows, cols),
        rows,
        cols,
    })
}
