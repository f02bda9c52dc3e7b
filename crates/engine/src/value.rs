// Evaluation results: scalars and matrices of expressions

use crate::error::{EngineError, EngineResult};
use crate::expr::Expr;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Expr>, // row-major
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<Expr>) -> EngineResult<Matrix> {
        if rows == 0 || cols == 0 || data.len() != rows * cols {
            return Err(EngineError::ShapeMismatch(format!(
                "{} entries do not fill a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn from_rows(rows: Vec<Vec<Expr>>) -> EngineResult<Matrix> {
        let row_count = rows.len();
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(EngineError::ShapeMismatch(
                "matrix rows have different lengths".to_string(),
            ));
        }
        Matrix::new(row_count, cols, rows.into_iter().flatten().collect())
    }

    pub fn identity(n: usize) -> Matrix {
        let data = (0..n * n)
            .map(|i| if i / n == i % n { Expr::one() } else { Expr::zero() })
            .collect();
        Matrix { rows: n, cols: n, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &Expr {
        &self.data[row * self.cols + col]
    }

    pub fn entries(&self) -> &[Expr] {
        &self.data
    }

    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(&Expr) -> Expr,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    pub fn row(&self, row: usize) -> &[Expr] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for r in 0..self.rows {
            if r > 0 {
                write!(f, ",")?;
            }
            let cells: Vec<String> = self.row(r).iter().map(|e| e.to_string()).collect();
            write!(f, "[{}]", cells.join(","))?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Expr),
    Matrix(Matrix),
}

impl Value {
    pub fn into_scalar(self) -> EngineResult<Expr> {
        match self {
            Value::Scalar(expr) => Ok(expr),
            Value::Matrix(_) => Err(EngineError::ExpectedScalar),
        }
    }

    pub fn into_matrix(self) -> EngineResult<Matrix> {
        match self {
            Value::Matrix(matrix) => Ok(matrix),
            Value::Scalar(_) => Err(EngineError::ExpectedMatrix),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Scalar(expr) => write!(f, "{}", expr),
            Value::Matrix(matrix) => write!(f, "{}", matrix),
        }
    }
}
