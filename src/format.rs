// Expression formatter
//
// Pure conversions between page state and engine syntax.

use crate::error::FormatError;
use parser::Expr;

/// Text of the solver region when the engine returns no pairs
pub const NO_SOLUTION_TEXT: &str = "No unique solution found.";

/// Row-major cells to `[[a,b],[c,d]]`. Blank cells become `0` and a short
/// slice is padded with `0`.
pub fn format_matrix<S: AsRef<str>>(cells: &[S], rows: usize, cols: usize) -> String {
    let cell = |i: usize| -> String {
        match cells.get(i).map(|c| c.as_ref().trim()) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => "0".to_string(),
        }
    };

    let body: Vec<String> = (0..rows)
        .map(|r| {
            let row: Vec<String> = (0..cols).map(|c| cell(r * cols + c)).collect();
            format!("[{}]", row.join(","))
        })
        .collect();
    format!("[{}]", body.join(","))
}

/// Non-blank equations in field order
pub fn collect_equations<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    fields
        .iter()
        .map(|f| f.as_ref())
        .filter(|f| !f.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// One `name = value` line per pair
pub fn format_solution(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return NO_SOLUTION_TEXT.to_string();
    }
    pairs
        .iter()
        .map(|(name, value)| format!("{} = {}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse `[[a,b],[c,d]]` back into rows of cell text.
/// The literal must pass the engine's expression grammar, so anything read
/// here is something the engine accepts too.
pub fn read_matrix(text: &str) -> Result<Vec<Vec<String>>, FormatError> {
    let widths = literal_shape(text)?;

    let inner = strip_brackets(text.trim())
        .ok_or_else(|| FormatError::MalformedMatrix("expected '[[...]]'".to_string()))?;
    let parts = items(inner);
    if parts.len() != widths.len() {
        return Err(FormatError::MalformedMatrix("cannot split rows".to_string()));
    }
    let rows = parts
        .into_iter()
        .zip(widths)
        .map(|(row, width)| {
            let row = strip_brackets(row.trim()).ok_or_else(|| {
                FormatError::MalformedMatrix(format!("row '{}' is not bracketed", row.trim()))
            })?;
            let cells: Vec<String> = items(row).into_iter().map(|c| c.trim().to_string()).collect();
            if cells.len() != width || cells.iter().any(|c| c.is_empty()) {
                return Err(FormatError::MalformedMatrix(format!("cannot split row '{}'", row)));
            }
            Ok(cells)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Row widths of a rectangular `[[...],...]` literal, checked with the parser
fn literal_shape(text: &str) -> Result<Vec<usize>, FormatError> {
    let ast = parser::parse_expression(text)
        .map_err(|errors| FormatError::MalformedMatrix(parser::error::summarize(&errors)))?;

    let rows = match ast {
        Expr::List(rows) if !rows.is_empty() => rows,
        _ => return Err(FormatError::MalformedMatrix("expected '[[...]]'".to_string())),
    };
    let widths = rows
        .iter()
        .map(|row| match row {
            Expr::List(cells) if !cells.is_empty() => Ok(cells.len()),
            _ => Err(FormatError::MalformedMatrix(
                "every row must be a non-empty '[...]'".to_string(),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if widths.iter().any(|w| Some(w) != widths.first()) {
        return Err(FormatError::MalformedMatrix(
            "rows have different lengths".to_string(),
        ));
    }
    Ok(widths)
}

/// Top-level items of a bracket body; one trailing comma is allowed
fn items(text: &str) -> Vec<&str> {
    let mut parts = split_top_level(text);
    if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
        parts.pop();
    }
    parts
}

fn strip_brackets(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.strip_suffix(']')
}

/// Split on commas outside any bracket or parenthesis
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
