// Symbolic expressions in canonical form
//
// Expressions are only built through the constructors in this module
// (`add`, `mul`, `pow`, `apply`), and each constructor returns a canonical
// tree: sums and products are flat, numbers are folded, like terms and equal
// bases are combined, and children are sorted. Two expressions that simplify
// to the same thing therefore compare equal structurally.

use crate::error::EngineResult;
use crate::number;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Abs,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "log" | "ln" => Some(Func::Log),
            "abs" => Some(Func::Abs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Abs => "abs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    Num(BigRational),
    Sym(String),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Func(Func, Box<Expr>),
}

impl Expr {
    pub fn int(value: i64) -> Expr {
        Expr::Num(number::int(value))
    }

    pub fn zero() -> Expr {
        Expr::Num(BigRational::zero())
    }

    pub fn one() -> Expr {
        Expr::Num(BigRational::one())
    }

    pub fn sym(name: &str) -> Expr {
        Expr::Sym(name.to_string())
    }

    pub fn as_num(&self) -> Option<&BigRational> {
        match self {
            Expr::Num(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_num().is_some_and(|n| n.is_zero())
    }

    pub fn is_one(&self) -> bool {
        self.as_num().is_some_and(|n| n.is_one())
    }

    /// True if `var` occurs anywhere in the tree
    pub fn contains(&self, var: &str) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Sym(name) => name == var,
            Expr::Add(items) | Expr::Mul(items) => items.iter().any(|e| e.contains(var)),
            Expr::Pow(base, exp) => base.contains(var) || exp.contains(var),
            Expr::Func(_, arg) => arg.contains(var),
        }
    }

    /// Free symbols in order of first appearance
    pub fn symbols(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    pub(crate) fn collect_symbols(&self, out: &mut Vec<String>) {
        match self {
            Expr::Num(_) => {}
            Expr::Sym(name) => {
                if !out.iter().any(|s| s == name) {
                    out.push(name.clone());
                }
            }
            Expr::Add(items) | Expr::Mul(items) => {
                for item in items {
                    item.collect_symbols(out);
                }
            }
            Expr::Pow(base, exp) => {
                base.collect_symbols(out);
                exp.collect_symbols(out);
            }
            Expr::Func(_, arg) => arg.collect_symbols(out),
        }
    }
}

// ==================== CONSTRUCTORS ====================

pub fn neg(expr: Expr) -> Expr {
    mul(vec![Expr::int(-1), expr])
}

pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
    add(vec![lhs, neg(rhs)])
}

pub fn div(lhs: Expr, rhs: Expr) -> EngineResult<Expr> {
    Ok(mul(vec![lhs, pow(rhs, Expr::int(-1))?]))
}

pub fn sqrt(expr: Expr) -> EngineResult<Expr> {
    pow(expr, Expr::Num(number::ratio(1, 2)))
}

/// Canonical sum
pub fn add(terms: Vec<Expr>) -> Expr {
    let mut constant = BigRational::zero();
    let mut collected: Vec<(Expr, BigRational)> = Vec::new();
    collect_terms(terms, &mut constant, &mut collected);

    let mut result: Vec<Expr> = collected
        .into_iter()
        .filter(|(_, coeff)| !coeff.is_zero())
        .map(|(rest, coeff)| with_coeff(coeff, rest))
        .collect();
    result.sort_by(term_order);

    if !constant.is_zero() {
        result.push(Expr::Num(constant));
    }

    match result.len() {
        0 => Expr::zero(),
        1 => result.remove(0),
        _ => Expr::Add(result),
    }
}

fn collect_terms(terms: Vec<Expr>, constant: &mut BigRational, collected: &mut Vec<(Expr, BigRational)>) {
    for term in terms {
        match term {
            Expr::Add(inner) => collect_terms(inner, constant, collected),
            Expr::Num(n) => *constant += n,
            other => {
                let (coeff, rest) = split_coeff(other);
                match collected.iter_mut().find(|(r, _)| *r == rest) {
                    Some((_, c)) => *c += coeff,
                    None => collected.push((rest, coeff)),
                }
            }
        }
    }
}

/// Split a canonical term into its numeric coefficient and the rest
pub(crate) fn split_coeff(term: Expr) -> (BigRational, Expr) {
    match term {
        Expr::Num(n) => (n, Expr::one()),
        Expr::Mul(mut factors) if matches!(factors.first(), Some(Expr::Num(_))) => {
            let coeff = match factors.remove(0) {
                Expr::Num(n) => n,
                _ => BigRational::one(),
            };
            let rest = if factors.len() == 1 {
                factors.remove(0)
            } else {
                Expr::Mul(factors)
            };
            (coeff, rest)
        }
        other => (BigRational::one(), other),
    }
}

fn with_coeff(coeff: BigRational, rest: Expr) -> Expr {
    if coeff.is_one() {
        return rest;
    }
    match rest {
        Expr::Mul(mut factors) => {
            factors.insert(0, Expr::Num(coeff));
            Expr::Mul(factors)
        }
        other => Expr::Mul(vec![Expr::Num(coeff), other]),
    }
}

/// Canonical product. Sums among the factors are distributed.
pub fn mul(factors: Vec<Expr>) -> Expr {
    let mut coeff = BigRational::one();
    let mut flat = Vec::new();
    flatten_factors(factors, &mut coeff, &mut flat);

    if coeff.is_zero() {
        return Expr::zero();
    }

    if let Some(pos) = flat.iter().position(|f| matches!(f, Expr::Add(_))) {
        if let Expr::Add(terms) = flat.remove(pos) {
            let distributed = terms
                .into_iter()
                .map(|term| {
                    let mut product = flat.clone();
                    product.push(Expr::Num(coeff.clone()));
                    product.push(term);
                    mul(product)
                })
                .collect();
            return add(distributed);
        }
    }

    // Group equal bases and add their exponents
    let mut groups: Vec<(Expr, Vec<Expr>)> = Vec::new();
    for factor in flat {
        let (base, exp) = split_power(factor);
        match groups.iter_mut().find(|(b, _)| *b == base) {
            Some((_, exps)) => exps.push(exp),
            None => groups.push((base, vec![exp])),
        }
    }

    let mut result = Vec::new();
    let mut needs_pass = false;
    for (base, exps) in groups {
        let mut exp = add(exps);
        // An unfolded integer power of an integer absorbs matching factors
        // of the coefficient: 2*2^5000 is 2^5001
        let shifted = match (&base, &exp) {
            (Expr::Num(b), Expr::Num(e)) if b.is_integer() && e.is_integer() => {
                let shift = number::remove_factor(&mut coeff, b.numer());
                (shift != 0).then(|| Expr::Num(e + number::int(shift)))
            }
            _ => None,
        };
        if let Some(shifted) = shifted {
            exp = shifted;
        }
        let combined = pow(base.clone(), exp.clone()).unwrap_or_else(|_| {
            Expr::Pow(Box::new(base), Box::new(exp))
        });
        match combined {
            Expr::Num(n) => coeff *= n,
            e @ (Expr::Mul(_) | Expr::Add(_)) => {
                needs_pass = true;
                result.push(e);
            }
            e => result.push(e),
        }
    }

    if needs_pass {
        result.push(Expr::Num(coeff));
        return mul(result);
    }
    if coeff.is_zero() {
        return Expr::zero();
    }

    result.sort_by(factor_order);
    if result.is_empty() {
        return Expr::Num(coeff);
    }
    if coeff.is_one() && result.len() == 1 {
        return result.remove(0);
    }
    if !coeff.is_one() {
        result.insert(0, Expr::Num(coeff));
    }
    Expr::Mul(result)
}

fn flatten_factors(factors: Vec<Expr>, coeff: &mut BigRational, out: &mut Vec<Expr>) {
    for factor in factors {
        match factor {
            Expr::Num(n) => *coeff *= n,
            Expr::Mul(inner) => flatten_factors(inner, coeff, out),
            other => out.push(other),
        }
    }
}

fn split_power(factor: Expr) -> (Expr, Expr) {
    match factor {
        Expr::Pow(base, exp) => (*base, *exp),
        other => (other, Expr::one()),
    }
}

/// Canonical power
pub fn pow(base: Expr, exp: Expr) -> EngineResult<Expr> {
    if exp.is_zero() {
        return Ok(Expr::one());
    }
    if exp.is_one() {
        return Ok(base);
    }
    if base.is_one() {
        return Ok(Expr::one());
    }

    let folded = match (base.as_num(), exp.as_num()) {
        (Some(b), Some(e)) => Some(number::pow_rational(b, e)?),
        _ => None,
    };
    if let Some(value) = folded {
        return Ok(match value {
            Some(value) => Expr::Num(value),
            None => Expr::Pow(Box::new(base), Box::new(exp)),
        });
    }

    let integer_exp = exp.as_num().and_then(number::as_i64);
    if let Some(n) = integer_exp {
        match base {
            Expr::Pow(inner_base, inner_exp) => {
                return pow(*inner_base, mul(vec![*inner_exp, exp]));
            }
            Expr::Mul(factors) => {
                let powered = factors
                    .into_iter()
                    .map(|f| pow(f, exp.clone()))
                    .collect::<EngineResult<Vec<_>>>()?;
                return Ok(mul(powered));
            }
            Expr::Add(terms) if (2..=8).contains(&n) => {
                let sum = Expr::Add(terms);
                let mut acc = sum.clone();
                for _ in 1..n {
                    acc = mul(vec![acc, sum.clone()]);
                }
                return Ok(acc);
            }
            other => return Ok(Expr::Pow(Box::new(other), Box::new(exp))),
        }
    }

    Ok(Expr::Pow(Box::new(base), Box::new(exp)))
}

/// Canonical function application, folding exact values
pub fn apply(func: Func, arg: Expr) -> Expr {
    let folded = match (func, &arg) {
        (Func::Sin | Func::Tan, a) if a.is_zero() => Some(Expr::zero()),
        (Func::Cos | Func::Exp, a) if a.is_zero() => Some(Expr::one()),
        (Func::Log, a) if a.is_one() => Some(Expr::zero()),
        (Func::Log, Expr::Func(Func::Exp, inner)) => Some((**inner).clone()),
        (Func::Exp, Expr::Func(Func::Log, inner)) => Some((**inner).clone()),
        (Func::Abs, Expr::Num(n)) => Some(Expr::Num(n.abs())),
        (Func::Abs, Expr::Func(Func::Abs, _)) => Some(arg.clone()),
        _ => None,
    };
    folded.unwrap_or_else(|| Expr::Func(func, Box::new(arg)))
}

// ==================== ORDERING ====================

/// Polynomial-style degree used only for ordering terms
fn degree(expr: &Expr) -> BigRational {
    match expr {
        Expr::Num(_) | Expr::Func(..) => BigRational::zero(),
        Expr::Sym(_) => BigRational::one(),
        Expr::Pow(_, exp) => exp.as_num().cloned().unwrap_or_else(BigRational::zero),
        Expr::Mul(factors) => factors.iter().map(degree).sum(),
        Expr::Add(terms) => terms.iter().map(degree).max().unwrap_or_else(BigRational::zero),
    }
}

/// Higher degree first, then structural order without the coefficient
fn term_order(a: &Expr, b: &Expr) -> Ordering {
    let (_, rest_a) = split_coeff(a.clone());
    let (_, rest_b) = split_coeff(b.clone());
    degree(&rest_b)
        .cmp(&degree(&rest_a))
        .then_with(|| rest_a.cmp(&rest_b))
}

fn factor_order(a: &Expr, b: &Expr) -> Ordering {
    let base = |e: &Expr| match e {
        Expr::Pow(base, _) => (**base).clone(),
        other => other.clone(),
    };
    base(a).cmp(&base(b)).then_with(|| a.cmp(b))
}

// ==================== DISPLAY ====================

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Sym(name) => write!(f, "{}", name),
            Expr::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    let text = term.to_string();
                    if i == 0 || text.starts_with('-') {
                        f.write_str(&text)?;
                    } else {
                        write!(f, "+{}", text)?;
                    }
                }
                Ok(())
            }
            Expr::Mul(_) | Expr::Pow(..) => f.write_str(&format_product(self)),
            Expr::Func(func, arg) => write!(f, "{}({})", func.name(), arg),
        }
    }
}

/// Products print as `numerator/denominator`, e.g. `x^2/2`, `-x`, `1/(x+1)`
fn format_product(expr: &Expr) -> String {
    let factors: Vec<&Expr> = match expr {
        Expr::Mul(factors) => factors.iter().collect(),
        other => vec![other],
    };

    let mut negative = false;
    let mut numer = Vec::new();
    let mut denom = Vec::new();

    for factor in factors {
        match factor {
            Expr::Num(c) => {
                negative = c.is_negative();
                let top = c.numer().abs();
                if !top.is_one() {
                    numer.push(top.to_string());
                }
                if !c.denom().is_one() {
                    denom.push(c.denom().to_string());
                }
            }
            Expr::Pow(base, exp) if exp.as_num().is_some_and(|e| e.is_negative()) => {
                let positive = exp.as_num().map(|e| -e).unwrap_or_else(BigRational::one);
                denom.push(format_power(base, &positive));
            }
            Expr::Pow(base, exp) => numer.push(format_power_expr(base, exp)),
            Expr::Add(_) => numer.push(format!("({})", factor)),
            other => numer.push(other.to_string()),
        }
    }

    let sign = if negative { "-" } else { "" };
    let top = if numer.is_empty() {
        "1".to_string()
    } else {
        numer.join("*")
    };

    match denom.len() {
        0 => format!("{}{}", sign, top),
        1 => format!("{}{}/{}", sign, top, denom[0]),
        _ => format!("{}{}/({})", sign, top, denom.join("*")),
    }
}

fn format_power(base: &Expr, exp: &BigRational) -> String {
    format_power_expr(base, &Expr::Num(exp.clone()))
}

fn format_power_expr(base: &Expr, exp: &Expr) -> String {
    if exp.is_one() {
        return format_base(base);
    }
    if exp.as_num().is_some_and(|e| *e == number::ratio(1, 2)) {
        return format!("sqrt({})", base);
    }

    let exponent = match exp {
        Expr::Num(n) if n.is_integer() && !n.is_negative() => n.to_string(),
        Expr::Sym(name) => name.clone(),
        other => format!("({})", other),
    };
    format!("{}^{}", format_base(base), exponent)
}

fn format_base(base: &Expr) -> String {
    match base {
        Expr::Sym(_) | Expr::Func(..) => base.to_string(),
        Expr::Num(n) if n.is_integer() && !n.is_negative() => n.to_string(),
        other => format!("({})", other),
    }
}
