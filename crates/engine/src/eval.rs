// Evaluation of parsed expressions
//
// Walks the parser's AST and builds canonical values. Arithmetic dispatches on
// the operand kinds: scalar with scalar, matrix with matrix, or a scalar
// broadcast over a matrix.

use crate::MatrixEvalMethod;
use crate::calculus;
use crate::error::{EngineError, EngineResult};
use crate::expr::{self, Expr, Func};
use crate::matrix;
use crate::number;
use crate::value::{Matrix, Value};
use log::trace;
use parser::ast::{self, BinaryOp, UnaryOp};

pub struct Evaluator {
    method: MatrixEvalMethod,
}

impl Evaluator {
    pub fn new(method: MatrixEvalMethod) -> Self {
        Evaluator { method }
    }

    pub fn eval(&self, node: &ast::Expr) -> EngineResult<Value> {
        match node {
            ast::Expr::Number(text) => number::parse_decimal(text)
                .map(|n| Value::Scalar(Expr::Num(n)))
                .ok_or_else(|| EngineError::Parse(format!("invalid number '{}'", text))),

            ast::Expr::Identifier(name) => Ok(Value::Scalar(Expr::Sym(name.clone()))),

            ast::Expr::Unary { op: UnaryOp::Negate, expr: operand } => match self.eval(operand)? {
                Value::Scalar(e) => Ok(Value::Scalar(expr::neg(e))),
                Value::Matrix(m) => Ok(Value::Matrix(matrix::scale(&m, &Expr::int(-1)))),
            },

            ast::Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                self.binary(op, lhs, rhs)
            }

            ast::Expr::Call { func, args } => self.call(func, args),

            ast::Expr::List(items) => self.list(items).map(Value::Matrix),
        }
    }

    pub fn eval_scalar(&self, node: &ast::Expr) -> EngineResult<Expr> {
        self.eval(node)?.into_scalar()
    }

    fn binary(&self, op: &BinaryOp, lhs: Value, rhs: Value) -> EngineResult<Value> {
        use Value::{Matrix as M, Scalar as S};

        let value = match (op, lhs, rhs) {
            (BinaryOp::Add, S(a), S(b)) => S(expr::add(vec![a, b])),
            (BinaryOp::Add, M(a), M(b)) => M(matrix::add(&a, &b)?),
            (BinaryOp::Sub, S(a), S(b)) => S(expr::sub(a, b)),
            (BinaryOp::Sub, M(a), M(b)) => M(matrix::sub(&a, &b)?),
            (BinaryOp::Add | BinaryOp::Sub, _, _) => {
                return Err(EngineError::ShapeMismatch(
                    "cannot add a scalar and a matrix".to_string(),
                ));
            }

            (BinaryOp::Mul, S(a), S(b)) => S(expr::mul(vec![a, b])),
            (BinaryOp::Mul, M(a), M(b)) => M(matrix::mul(&a, &b)?),
            (BinaryOp::Mul, S(s), M(m)) | (BinaryOp::Mul, M(m), S(s)) => M(matrix::scale(&m, &s)),

            (BinaryOp::Div, S(a), S(b)) => {
                if b.is_zero() {
                    return Err(EngineError::DivisionByZero);
                }
                S(expr::div(a, b)?)
            }
            (BinaryOp::Div, M(m), S(s)) => {
                if s.is_zero() {
                    return Err(EngineError::DivisionByZero);
                }
                M(matrix::scale(&m, &expr::pow(s, Expr::int(-1))?))
            }
            (BinaryOp::Div, M(a), M(b)) => {
                let inverse = matrix::inverse(&b, self.method)?;
                M(matrix::mul(&a, &inverse)?)
            }
            (BinaryOp::Div, S(_), M(_)) => return Err(EngineError::ExpectedScalar),

            (BinaryOp::Pow, S(a), S(b)) => S(expr::pow(a, b)?),
            (BinaryOp::Pow, M(m), S(s)) => {
                let n = s
                    .as_num()
                    .and_then(number::as_i64)
                    .ok_or_else(|| {
                        EngineError::Unsupported(format!("matrix power {} is not an integer", s))
                    })?;
                M(matrix::power(&m, n, self.method)?)
            }
            (BinaryOp::Pow, _, M(_)) => return Err(EngineError::ExpectedScalar),
        };
        Ok(value)
    }

    fn call(&self, name: &str, args: &[ast::Expr]) -> EngineResult<Value> {
        trace!("call {}({} args)", name, args.len());

        match name {
            "det" => {
                let m = self.one_arg(name, args)?.into_matrix()?;
                Ok(Value::Scalar(matrix::determinant(&m, self.method)?))
            }
            "invert" | "inv" => {
                let m = self.one_arg(name, args)?.into_matrix()?;
                Ok(Value::Matrix(matrix::inverse(&m, self.method)?))
            }
            "transpose" => {
                let m = self.one_arg(name, args)?.into_matrix()?;
                Ok(Value::Matrix(matrix::transpose(&m)))
            }
            "sqrt" => {
                let e = self.one_arg(name, args)?.into_scalar()?;
                Ok(Value::Scalar(expr::sqrt(e)?))
            }
            "simplify" => self.one_arg(name, args),
            "diff" | "integrate" => {
                let (target, var) = self.calculus_args(name, args)?;
                let result = if name == "diff" {
                    calculus::differentiate(&target, &var)?
                } else {
                    calculus::integrate(&target, &var)?
                };
                Ok(Value::Scalar(result))
            }
            _ => match Func::from_name(name) {
                Some(func) => {
                    let arg = self.one_arg(name, args)?;
                    self.apply_func(func, arg)
                }
                None => Err(EngineError::UnknownFunction(name.to_string())),
            },
        }
    }

    fn apply_func(&self, func: Func, arg: Value) -> EngineResult<Value> {
        match arg {
            Value::Scalar(e) => Ok(Value::Scalar(expr::apply(func, e))),
            Value::Matrix(m) => Ok(Value::Matrix(m.map(|e| expr::apply(func, e.clone())))),
        }
    }

    fn one_arg(&self, name: &str, args: &[ast::Expr]) -> EngineResult<Value> {
        match args {
            [arg] => self.eval(arg),
            _ => Err(EngineError::Arity {
                name: name.to_string(),
                expected: "1",
                found: args.len(),
            }),
        }
    }

    /// `diff(f)` / `diff(f, v)`: the variable defaults to the first free symbol, or `x`
    fn calculus_args(&self, name: &str, args: &[ast::Expr]) -> EngineResult<(Expr, String)> {
        match args {
            [target] => {
                let target = self.eval_scalar(target)?;
                let var = target
                    .symbols()
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| "x".to_string());
                Ok((target, var))
            }
            [target, ast::Expr::Identifier(var)] => Ok((self.eval_scalar(target)?, var.clone())),
            [_, ast::Expr::Number(text)] => Err(EngineError::InvalidVariable(text.clone())),
            [_, _] => Err(EngineError::InvalidVariable("<expression>".to_string())),
            _ => Err(EngineError::Arity {
                name: name.to_string(),
                expected: "1 or 2",
                found: args.len(),
            }),
        }
    }

    /// `[[a,b],[c,d]]` is a 2x2 matrix; a flat list `[a,b,c]` is a single row
    fn list(&self, items: &[ast::Expr]) -> EngineResult<Matrix> {
        if items.is_empty() {
            return Err(EngineError::ShapeMismatch("empty matrix".to_string()));
        }

        let nested = items.iter().filter(|i| matches!(i, ast::Expr::List(_))).count();
        if nested == 0 {
            let row = items
                .iter()
                .map(|i| self.eval_scalar(i))
                .collect::<EngineResult<Vec<_>>>()?;
            return Matrix::from_rows(vec![row]);
        }
        if nested != items.len() {
            return Err(EngineError::ShapeMismatch(
                "matrix mixes rows and scalars".to_string(),
            ));
        }

        let rows = items
            .iter()
            .map(|item| match item {
                ast::Expr::List(cells) => cells
                    .iter()
                    .map(|c| self.eval_scalar(c))
                    .collect::<EngineResult<Vec<_>>>(),
                _ => Err(EngineError::ExpectedMatrix),
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Matrix::from_rows(rows)
    }
}
