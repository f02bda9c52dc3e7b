// Linear systems
//
// Each equation is moved to `lhs - rhs = 0`, brought to canonical form and
// read off as a row of rational coefficients. The rows are then solved with
// exact Gaussian elimination.

use crate::error::{EngineError, EngineResult};
use crate::expr::{self, Expr, split_coeff};
use num_rational::BigRational;
use num_traits::Zero;

/// One equation as `coeffs · unknowns + constant = 0`
struct LinearRow {
    coeffs: Vec<BigRational>,
    constant: BigRational,
}

/// Solve `residuals[i] = 0` for every free symbol.
/// The result is sorted by unknown name.
pub fn solve_linear(residuals: &[Expr]) -> EngineResult<Vec<(String, Expr)>> {
    let mut unknowns = Vec::new();
    for residual in residuals {
        residual.collect_symbols(&mut unknowns);
    }

    if unknowns.len() != residuals.len() {
        return Err(EngineError::SystemShape {
            equations: residuals.len(),
            unknowns: unknowns.len(),
        });
    }

    let rows = residuals
        .iter()
        .map(|r| linear_row(r, &unknowns))
        .collect::<EngineResult<Vec<_>>>()?;

    let values = gaussian_solve(rows, unknowns.len())?;
    let mut solution: Vec<(String, Expr)> = unknowns
        .into_iter()
        .zip(values.into_iter().map(Expr::Num))
        .collect();
    solution.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(solution)
}

fn linear_row(residual: &Expr, unknowns: &[String]) -> EngineResult<LinearRow> {
    let terms = match residual {
        Expr::Add(terms) => terms.clone(),
        other => vec![other.clone()],
    };

    let mut row = LinearRow {
        coeffs: vec![BigRational::zero(); unknowns.len()],
        constant: BigRational::zero(),
    };

    for term in terms {
        let (coeff, rest) = split_coeff(term);
        match rest {
            Expr::Num(n) => row.constant += coeff * n,
            Expr::Sym(name) => {
                let index = unknowns
                    .iter()
                    .position(|u| *u == name)
                    .ok_or_else(|| EngineError::NonLinear(residual.to_string()))?;
                row.coeffs[index] += coeff;
            }
            _ => return Err(EngineError::NonLinear(residual.to_string())),
        }
    }
    Ok(row)
}

fn gaussian_solve(rows: Vec<LinearRow>, n: usize) -> EngineResult<Vec<BigRational>> {
    // Augmented matrix [A | -c]
    let mut m: Vec<Vec<BigRational>> = rows
        .into_iter()
        .map(|row| {
            let mut line = row.coeffs;
            line.push(-row.constant);
            line
        })
        .collect();

    for col in 0..n {
        let pivot = (col..n)
            .find(|&r| !m[r][col].is_zero())
            .ok_or(EngineError::NoUniqueSolution)?;
        m.swap(pivot, col);

        let p = m[col][col].clone();
        for value in m[col].iter_mut() {
            *value /= p.clone();
        }

        for r in 0..n {
            if r == col || m[r][col].is_zero() {
                continue;
            }
            let factor = m[r][col].clone();
            let pivot_row = m[col].clone();
            for (value, pivot_value) in m[r].iter_mut().zip(pivot_row) {
                *value -= factor.clone() * pivot_value;
            }
        }
    }

    Ok(m.into_iter().map(|row| row[n].clone()).collect())
}

/// `lhs - rhs` in canonical form
pub fn residual(lhs: Expr, rhs: Expr) -> Expr {
    expr::sub(lhs, rhs)
}
