// Dynamic form builder
//
// Regenerates the equation inputs and matrix grids when their selectors
// change. Every rebuild starts from fresh fields; previous contents are
// discarded.

use crate::dom::{Dom, Element};
use crate::error::FormatError;
use log::debug;

/// Unknowns offered by the solver, in label order
pub const VARIABLE_POOL: [&str; 4] = ["x", "y", "z", "w"];

pub const EQUATIONS_CONTAINER: &str = "equations";

pub fn equation_id(index: usize) -> String {
    format!("eq{}", index)
}

pub fn cell_id(name: &str, row: usize, col: usize) -> String {
    format!("{}-r{}-c{}", name, row, col)
}

/// `count` empty equation inputs `eq1..eqN`, labeled with the first `count`
/// variables of the pool
pub fn build_equation_fields(count: usize) -> Result<Vec<Element>, FormatError> {
    check_range("equation count", count, 1, VARIABLE_POOL.len())?;

    let variables = VARIABLE_POOL[..count].join(", ");
    let fields = (1..=count)
        .map(|i| {
            Element::new("input")
                .with_id(&equation_id(i))
                .with_class("equation-input")
                .with_attr("type", "text")
                .with_attr("data-vars", &variables)
                .with_attr("placeholder", &format!("Equation {} in {}", i, variables))
                .with_value("")
        })
        .collect();
    Ok(fields)
}

/// `rows * cols` cells in row-major order, `1` on the diagonal and `0` elsewhere
pub fn build_matrix_grid(
    name: &str,
    rows: usize,
    cols: usize,
    max_dimension: usize,
) -> Result<Vec<Element>, FormatError> {
    check_range("rows", rows, 1, max_dimension)?;
    check_range("columns", cols, 1, max_dimension)?;

    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let initial = if r == c { "1" } else { "0" };
            cells.push(
                Element::new("input")
                    .with_id(&cell_id(name, r, c))
                    .with_class("matrix-cell")
                    .with_attr("type", "text")
                    .with_value(initial),
            );
        }
    }
    Ok(cells)
}

pub fn regenerate_equations(dom: &mut dyn Dom, count: usize) -> Result<(), FormatError> {
    let fields = build_equation_fields(count)?;
    debug!("rebuilding {} equation field(s)", count);
    dom.replace_children(EQUATIONS_CONTAINER, fields);
    Ok(())
}

pub fn regenerate_matrix(
    dom: &mut dyn Dom,
    name: &str,
    rows: usize,
    cols: usize,
    max_dimension: usize,
) -> Result<(), FormatError> {
    let cells = build_matrix_grid(name, rows, cols, max_dimension)?;
    debug!("rebuilding {} as {}x{}", name, rows, cols);
    dom.replace_children(name, cells);
    dom.set_attr(name, "data-rows", &rows.to_string());
    dom.set_attr(name, "data-cols", &cols.to_string());
    Ok(())
}

/// Values of a matrix grid in row-major order
pub fn read_grid(dom: &dyn Dom, name: &str, rows: usize, cols: usize) -> Vec<String> {
    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            cells.push(dom.value(&cell_id(name, r, c)).unwrap_or_default());
        }
    }
    cells
}

/// Values of the equation fields currently in the container, in order
pub fn read_equations(dom: &dyn Dom) -> Vec<String> {
    dom.child_ids(EQUATIONS_CONTAINER)
        .iter()
        .map(|id| dom.value(id).unwrap_or_default())
        .collect()
}

/// Parse a selector value as a dimension
pub fn read_dimension(dom: &dyn Dom, id: &str, what: &'static str) -> Result<usize, FormatError> {
    let text = dom.value(id).unwrap_or_default();
    text.trim().parse().map_err(|_| FormatError::NotANumber {
        what,
        text: text.clone(),
    })
}

fn check_range(what: &'static str, value: usize, min: usize, max: usize) -> Result<(), FormatError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FormatError::OutOfRange {
            what,
            value,
            min,
            max,
        })
    }
}
