// Matrix algebra over symbolic entries
//
// Matrices whose entries are all numbers always go through exact Gaussian
// elimination. Under symbolic evaluation, any other matrix uses cofactor
// expansion (with memoized minors) and the adjugate, so entries may contain
// free symbols. Numeric evaluation rejects non-numeric entries.

use crate::error::{EngineError, EngineResult};
use crate::expr::{self, Expr};
use crate::value::Matrix;
use crate::MatrixEvalMethod;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::collections::HashMap;

pub fn add(a: &Matrix, b: &Matrix) -> EngineResult<Matrix> {
    same_shape(a, b, "add")?;
    let data = a
        .entries()
        .iter()
        .zip(b.entries())
        .map(|(x, y)| expr::add(vec![x.clone(), y.clone()]))
        .collect();
    Matrix::new(a.rows(), a.cols(), data)
}

pub fn sub(a: &Matrix, b: &Matrix) -> EngineResult<Matrix> {
    same_shape(a, b, "subtract")?;
    let data = a
        .entries()
        .iter()
        .zip(b.entries())
        .map(|(x, y)| expr::sub(x.clone(), y.clone()))
        .collect();
    Matrix::new(a.rows(), a.cols(), data)
}

pub fn mul(a: &Matrix, b: &Matrix) -> EngineResult<Matrix> {
    if a.cols() != b.rows() {
        return Err(EngineError::ShapeMismatch(format!(
            "cannot multiply {}x{} by {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }

    let mut data = Vec::with_capacity(a.rows() * b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let terms = (0..a.cols())
                .map(|k| expr::mul(vec![a.get(i, k).clone(), b.get(k, j).clone()]))
                .collect();
            data.push(expr::add(terms));
        }
    }
    Matrix::new(a.rows(), b.cols(), data)
}

pub fn scale(a: &Matrix, factor: &Expr) -> Matrix {
    a.map(|e| expr::mul(vec![factor.clone(), e.clone()]))
}

pub fn transpose(a: &Matrix) -> Matrix {
    let mut data = Vec::with_capacity(a.rows() * a.cols());
    for j in 0..a.cols() {
        for i in 0..a.rows() {
            data.push(a.get(i, j).clone());
        }
    }
    // Same entry count, so the shape is always valid
    Matrix::new(a.cols(), a.rows(), data).unwrap_or_else(|_| a.clone())
}

pub fn determinant(a: &Matrix, method: MatrixEvalMethod) -> EngineResult<Expr> {
    require_square(a)?;
    let rows = match (method, numeric_rows(a)) {
        (_, Ok(rows)) => rows,
        (MatrixEvalMethod::Symbolic, Err(_)) => return Ok(cofactor_det(&rows_of(a))),
        (MatrixEvalMethod::Numeric, Err(err)) => return Err(err),
    };
    let (det, _) = eliminate(rows, None)?;
    Ok(Expr::Num(det))
}

pub fn inverse(a: &Matrix, method: MatrixEvalMethod) -> EngineResult<Matrix> {
    require_square(a)?;
    let rows = match (method, numeric_rows(a)) {
        (_, Ok(rows)) => rows,
        (MatrixEvalMethod::Symbolic, Err(_)) => return adjugate_inverse(a),
        (MatrixEvalMethod::Numeric, Err(err)) => return Err(err),
    };

    let n = a.rows();
    let (det, inverse) = eliminate(rows, Some(n))?;
    if det.is_zero() {
        return Err(EngineError::Singular);
    }
    let data = inverse
        .into_iter()
        .flatten()
        .map(Expr::Num)
        .collect();
    Matrix::new(n, n, data)
}

/// Integer power of a square matrix; negative powers go through the inverse
pub fn power(a: &Matrix, exponent: i64, method: MatrixEvalMethod) -> EngineResult<Matrix> {
    require_square(a)?;
    let base = if exponent < 0 {
        inverse(a, method)?
    } else {
        a.clone()
    };

    // Square and multiply
    let mut result = Matrix::identity(a.rows());
    let mut square = base;
    let mut remaining = exponent.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = mul(&result, &square)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = mul(&square, &square)?;
        }
    }
    Ok(result)
}

fn same_shape(a: &Matrix, b: &Matrix, action: &str) -> EngineResult<()> {
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return Err(EngineError::ShapeMismatch(format!(
            "cannot {} {}x{} and {}x{}",
            action,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

fn require_square(a: &Matrix) -> EngineResult<()> {
    if a.is_square() {
        Ok(())
    } else {
        Err(EngineError::NotSquare {
            rows: a.rows(),
            cols: a.cols(),
        })
    }
}

fn rows_of(a: &Matrix) -> Vec<Vec<Expr>> {
    (0..a.rows()).map(|r| a.row(r).to_vec()).collect()
}

// ==================== SYMBOLIC ====================

/// Laplace expansion along the first row
fn cofactor_det(rows: &[Vec<Expr>]) -> Expr {
    let columns: Vec<usize> = (0..rows.len()).collect();
    expand(rows, &columns, &mut HashMap::new())
}

/// Determinant of the bottom rows restricted to `columns`.
/// The row is implied by how many columns are left, so minors are cached by
/// their column set alone.
fn expand(rows: &[Vec<Expr>], columns: &[usize], memo: &mut HashMap<Vec<usize>, Expr>) -> Expr {
    if columns.is_empty() {
        return Expr::one();
    }
    if let Some(det) = memo.get(columns) {
        return det.clone();
    }

    let row = &rows[rows.len() - columns.len()];
    let mut terms = Vec::with_capacity(columns.len());
    for (position, &col) in columns.iter().enumerate() {
        let entry = &row[col];
        if entry.is_zero() {
            continue;
        }
        let rest: Vec<usize> = columns.iter().copied().filter(|&c| c != col).collect();
        let minor = expand(rows, &rest, memo);
        if minor.is_zero() {
            continue;
        }
        let sign = if position % 2 == 0 { 1 } else { -1 };
        terms.push(expr::mul(vec![Expr::int(sign), entry.clone(), minor]));
    }

    let det = expr::add(terms);
    memo.insert(columns.to_vec(), det.clone());
    det
}

fn minor(rows: &[Vec<Expr>], skip_row: usize, skip_col: usize) -> Vec<Vec<Expr>> {
    rows.iter()
        .enumerate()
        .filter(|(i, _)| *i != skip_row)
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(|(j, _)| *j != skip_col)
                .map(|(_, e)| e.clone())
                .collect()
        })
        .collect()
}

fn adjugate_inverse(a: &Matrix) -> EngineResult<Matrix> {
    let rows = rows_of(a);
    let det = cofactor_det(&rows);
    if det.is_zero() {
        return Err(EngineError::Singular);
    }
    let inv_det = expr::pow(det, Expr::int(-1))?;

    let n = a.rows();
    if n == 1 {
        return Matrix::new(1, 1, vec![inv_det]);
    }

    // inverse[j][i] = cofactor(i, j) / det
    let mut data = vec![Expr::zero(); n * n];
    for i in 0..n {
        for j in 0..n {
            let sign = if (i + j) % 2 == 0 { 1 } else { -1 };
            let cofactor = expr::mul(vec![Expr::int(sign), cofactor_det(&minor(&rows, i, j))]);
            data[j * n + i] = expr::mul(vec![cofactor, inv_det.clone()]);
        }
    }
    Matrix::new(n, n, data)
}

// ==================== NUMERIC ====================

fn numeric_rows(a: &Matrix) -> EngineResult<Vec<Vec<BigRational>>> {
    (0..a.rows())
        .map(|r| {
            a.row(r)
                .iter()
                .map(|e| {
                    e.as_num()
                        .cloned()
                        .ok_or_else(|| EngineError::NonNumericEntry(e.to_string()))
                })
                .collect::<EngineResult<Vec<BigRational>>>()
        })
        .collect()
}

/// Gauss-Jordan elimination with exact rationals.
/// Returns the determinant and, when `augment` is set, the inverse.
fn eliminate(
    mut rows: Vec<Vec<BigRational>>,
    augment: Option<usize>,
) -> EngineResult<(BigRational, Vec<Vec<BigRational>>)> {
    let n = rows.len();
    if augment.is_some() {
        for (i, row) in rows.iter_mut().enumerate() {
            row.extend((0..n).map(|j| {
                if i == j {
                    BigRational::one()
                } else {
                    BigRational::zero()
                }
            }));
        }
    }

    let mut det = BigRational::one();
    for col in 0..n {
        let pivot = match (col..n).find(|&r| !rows[r][col].is_zero()) {
            Some(pivot) => pivot,
            None => return Ok((BigRational::zero(), Vec::new())),
        };
        if pivot != col {
            rows.swap(pivot, col);
            det = -det;
        }

        let p = rows[col][col].clone();
        det *= p.clone();
        for value in rows[col].iter_mut() {
            *value /= p.clone();
        }

        for r in 0..n {
            if r == col || rows[r][col].is_zero() {
                continue;
            }
            let factor = rows[r][col].clone();
            let pivot_row = rows[col].clone();
            for (value, pivot_value) in rows[r].iter_mut().zip(pivot_row) {
                *value -= factor.clone() * pivot_value;
            }
        }
    }

    let inverse = match augment {
        Some(width) => rows.into_iter().map(|row| row[n..n + width].to_vec()).collect(),
        None => Vec::new(),
    };
    Ok((det, inverse))
}
