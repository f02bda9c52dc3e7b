// Symbolic differentiation and integration
//
// Both operate on canonical expressions and rebuild their results through the
// canonical constructors, so the output is already simplified.

use crate::error::{EngineError, EngineResult};
use crate::expr::{Expr, Func, add, apply, mul, neg, pow, sub};
use crate::number;

/// Largest power of the variable handled by integration by parts
const MAX_PARTS_DEGREE: i64 = 16;

pub fn differentiate(expr: &Expr, var: &str) -> EngineResult<Expr> {
    // Constant Rule: d/dx c = 0
    if !expr.contains(var) {
        return Ok(Expr::zero());
    }

    match expr {
        Expr::Num(_) => Ok(Expr::zero()),
        Expr::Sym(name) => Ok(if name == var { Expr::one() } else { Expr::zero() }),
        Expr::Add(terms) => {
            let parts = terms
                .iter()
                .map(|t| differentiate(t, var))
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(add(parts))
        }
        Expr::Mul(factors) => {
            // Product Rule, one term per factor
            let mut terms = Vec::with_capacity(factors.len());
            for i in 0..factors.len() {
                let d = differentiate(&factors[i], var)?;
                if d.is_zero() {
                    continue;
                }
                let mut product = factors.clone();
                product[i] = d;
                terms.push(mul(product));
            }
            Ok(add(terms))
        }
        Expr::Pow(base, exp) => {
            let (base, exp) = (base.as_ref(), exp.as_ref());
            let db = differentiate(base, var)?;

            if !exp.contains(var) {
                // (u^n)' = n * u^(n-1) * u'
                let lowered = pow(base.clone(), sub(exp.clone(), Expr::one()))?;
                return Ok(mul(vec![exp.clone(), lowered, db]));
            }

            let de = differentiate(exp, var)?;
            let ln_base = apply(Func::Log, base.clone());
            if !base.contains(var) {
                // (a^u)' = a^u * ln(a) * u'
                return Ok(mul(vec![expr.clone(), ln_base, de]));
            }

            // (u^v)' = u^v * (v' * ln(u) + v * u' / u)
            let inner = add(vec![
                mul(vec![de, ln_base]),
                mul(vec![exp.clone(), db, pow(base.clone(), Expr::int(-1))?]),
            ]);
            Ok(mul(vec![expr.clone(), inner]))
        }
        Expr::Func(func, arg) => {
            let arg = arg.as_ref();
            let da = differentiate(arg, var)?;
            let outer = match func {
                Func::Sin => apply(Func::Cos, arg.clone()),
                Func::Cos => neg(apply(Func::Sin, arg.clone())),
                Func::Tan => pow(apply(Func::Cos, arg.clone()), Expr::int(-2))?,
                Func::Exp => expr.clone(),
                Func::Log => pow(arg.clone(), Expr::int(-1))?,
                // abs(u)' = u / abs(u) * u'
                Func::Abs => mul(vec![arg.clone(), pow(expr.clone(), Expr::int(-1))?]),
            };
            Ok(mul(vec![outer, da]))
        }
    }
}

/// Antiderivative without a constant of integration
pub fn integrate(expr: &Expr, var: &str) -> EngineResult<Expr> {
    let x = Expr::sym(var);
    if !expr.contains(var) {
        return Ok(mul(vec![expr.clone(), x]));
    }

    match expr {
        Expr::Sym(_) => Ok(mul(vec![
            Expr::Num(number::ratio(1, 2)),
            pow(x, Expr::int(2))?,
        ])),
        Expr::Add(terms) => {
            let parts = terms
                .iter()
                .map(|t| integrate(t, var))
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(add(parts))
        }
        Expr::Mul(factors) => {
            let (dependent, constant): (Vec<Expr>, Vec<Expr>) =
                factors.iter().cloned().partition(|f| f.contains(var));
            let inner = match dependent.as_slice() {
                [single] => integrate(single, var)?,
                [first, second] => by_parts(first, second, var)
                    .or_else(|| by_parts(second, first, var))
                    .unwrap_or_else(|| Err(unsupported(expr)))?,
                _ => return Err(unsupported(expr)),
            };
            let mut product = constant;
            product.push(inner);
            Ok(mul(product))
        }
        Expr::Pow(base, exp) => integrate_power(expr, base, exp, var),
        Expr::Func(func, arg) => integrate_function(expr, *func, arg, var),
        Expr::Num(_) => Ok(mul(vec![expr.clone(), x])),
    }
}

fn integrate_power(expr: &Expr, base: &Expr, exp: &Expr, var: &str) -> EngineResult<Expr> {
    if !exp.contains(var) {
        let (a, _) = linear(base, var).ok_or_else(|| unsupported(expr))?;
        if exp.as_num().is_some_and(|e| *e == number::int(-1)) {
            // 1/(a*x+b) -> log(a*x+b)/a
            return Ok(mul(vec![
                apply(Func::Log, base.clone()),
                pow(a, Expr::int(-1))?,
            ]));
        }
        // (a*x+b)^n -> (a*x+b)^(n+1) / (a*(n+1))
        let raised = add(vec![exp.clone(), Expr::one()]);
        let denominator = mul(vec![a, raised.clone()]);
        return Ok(mul(vec![
            pow(base.clone(), raised)?,
            pow(denominator, Expr::int(-1))?,
        ]));
    }

    if !base.contains(var) {
        // c^(a*x+b) -> c^(a*x+b) / (a*log(c))
        let (a, _) = linear(exp, var).ok_or_else(|| unsupported(expr))?;
        let denominator = mul(vec![a, apply(Func::Log, base.clone())]);
        return Ok(mul(vec![expr.clone(), pow(denominator, Expr::int(-1))?]));
    }

    Err(unsupported(expr))
}

fn integrate_function(expr: &Expr, func: Func, arg: &Expr, var: &str) -> EngineResult<Expr> {
    let (a, _) = linear(arg, var).ok_or_else(|| unsupported(expr))?;
    let inv_a = pow(a, Expr::int(-1))?;

    let antiderivative = match func {
        Func::Exp => expr.clone(),
        Func::Sin => neg(apply(Func::Cos, arg.clone())),
        Func::Cos => apply(Func::Sin, arg.clone()),
        Func::Tan => neg(apply(Func::Log, apply(Func::Cos, arg.clone()))),
        // u*log(u) - u
        Func::Log => sub(
            mul(vec![arg.clone(), apply(Func::Log, arg.clone())]),
            arg.clone(),
        ),
        Func::Abs => return Err(unsupported(expr)),
    };
    Ok(mul(vec![antiderivative, inv_a]))
}

/// ∫ x^n * g = x^n * G - n * ∫ x^(n-1) * G, for g in {exp, sin, cos} of a linear argument.
/// `None` when the pair does not have that shape.
fn by_parts(poly: &Expr, other: &Expr, var: &str) -> Option<EngineResult<Expr>> {
    let n = variable_degree(poly, var)?;
    if !(1..=MAX_PARTS_DEGREE).contains(&n) {
        return None;
    }
    match other {
        Expr::Func(Func::Exp | Func::Sin | Func::Cos, arg) if linear(arg, var).is_some() => {}
        _ => return None,
    }

    let step = || -> EngineResult<Expr> {
        let x = Expr::sym(var);
        let big_g = integrate(other, var)?;
        let lowered = mul(vec![Expr::int(n), pow(x, Expr::int(n - 1))?, big_g.clone()]);
        let rest = integrate(&lowered, var)?;
        Ok(sub(mul(vec![poly.clone(), big_g]), rest))
    };
    Some(step())
}

/// n for `x` or `x^n` with a positive integer n
fn variable_degree(expr: &Expr, var: &str) -> Option<i64> {
    match expr {
        Expr::Sym(name) if name == var => Some(1),
        Expr::Pow(base, exp) if matches!(base.as_ref(), Expr::Sym(name) if name == var) => {
            exp.as_num().and_then(number::as_i64).filter(|n| *n > 0)
        }
        _ => None,
    }
}

/// Split `a*x + c` into `(a, c)` when both are free of `x` and `a != 0`
pub(crate) fn linear(expr: &Expr, var: &str) -> Option<(Expr, Expr)> {
    let a = differentiate(expr, var).ok()?;
    if a.is_zero() || a.contains(var) {
        return None;
    }
    let c = sub(expr.clone(), mul(vec![a.clone(), Expr::sym(var)]));
    if c.contains(var) {
        return None;
    }
    Some((a, c))
}

fn unsupported(expr: &Expr) -> EngineError {
    EngineError::Unsupported(format!("unable to integrate {}", expr))
}
