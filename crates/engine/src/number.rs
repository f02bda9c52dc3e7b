// Exact rational arithmetic helpers
//
// All numbers in the engine are BigRational; decimals from the input are read
// exactly, so 0.1 + 0.2 is 3/10.

use crate::error::{EngineError, EngineResult};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Largest integer exponent folded into an exact number
const MAX_EXACT_EXPONENT: u32 = 4096;

/// Largest root index tried when folding rational exponents
const MAX_ROOT_INDEX: u32 = 64;

pub fn int(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

pub fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Read a decimal literal (`42`, `3.14`, `.5`, `2.`) exactly
pub fn parse_decimal(text: &str) -> Option<BigRational> {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let digits = format!("{}{}", int_part, frac_part);
    let numer: BigInt = digits.parse().ok()?;
    let denom = BigInt::from(10u32).pow(frac_part.len() as u32);
    Some(BigRational::new(numer, denom))
}

/// Integer exponent as i64, when the rational is an integer that fits
pub fn as_i64(value: &BigRational) -> Option<i64> {
    if value.is_integer() {
        value.to_integer().to_i64()
    } else {
        None
    }
}

/// `base ^ exponent` for an integer exponent.
/// Returns `Ok(None)` when the exponent is too large to fold.
pub fn pow_int(base: &BigRational, exponent: i64) -> EngineResult<Option<BigRational>> {
    if exponent.unsigned_abs() > MAX_EXACT_EXPONENT as u64 {
        return Ok(None);
    }
    if exponent < 0 && base.is_zero() {
        return Err(EngineError::DivisionByZero);
    }

    let e = exponent.unsigned_abs() as u32;
    let numer = base.numer().pow(e);
    let denom = base.denom().pow(e);

    let value = if exponent < 0 {
        BigRational::new(denom, numer)
    } else {
        BigRational::new(numer, denom)
    };
    Ok(Some(value))
}

/// Divide `base` out of `value` as often as it goes, in numerator and
/// denominator. Returns `k` such that the old value is `value * base^k`.
pub fn remove_factor(value: &mut BigRational, base: &BigInt) -> i64 {
    if *base <= BigInt::one() || value.is_zero() {
        return 0;
    }

    let mut numer = value.numer().clone();
    let mut denom = value.denom().clone();
    let mut count = 0;
    while (&numer % base).is_zero() {
        numer /= base;
        count += 1;
    }
    while (&denom % base).is_zero() {
        denom /= base;
        count -= 1;
    }
    *value = BigRational::new(numer, denom);
    count
}

/// Exact `index`-th root of a non-negative rational, if one exists
pub fn exact_root(value: &BigRational, index: u32) -> Option<BigRational> {
    if value.is_negative() || index == 0 || index > MAX_ROOT_INDEX {
        return None;
    }
    let numer = value.numer().nth_root(index);
    let denom = value.denom().nth_root(index);
    if numer.pow(index) == *value.numer() && denom.pow(index) == *value.denom() {
        Some(BigRational::new(numer, denom))
    } else {
        None
    }
}

/// `base ^ exponent` for rational operands when the result is exact.
/// `Ok(None)` means the power has to stay symbolic.
pub fn pow_rational(base: &BigRational, exponent: &BigRational) -> EngineResult<Option<BigRational>> {
    if let Some(e) = as_i64(exponent) {
        return pow_int(base, e);
    }
    if base.is_zero() {
        return if exponent.is_positive() {
            Ok(Some(BigRational::zero()))
        } else {
            Err(EngineError::DivisionByZero)
        };
    }
    if base.is_one() {
        return Ok(Some(BigRational::one()));
    }

    let index = match exponent.denom().to_u32() {
        Some(index) => index,
        None => return Ok(None),
    };
    let power = match exponent.numer().to_i64() {
        Some(power) => power,
        None => return Ok(None),
    };

    match exact_root(base, index) {
        Some(root) => pow_int(&root, power),
        None => Ok(None),
    }
}
