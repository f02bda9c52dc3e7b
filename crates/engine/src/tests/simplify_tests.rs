// Simplification Tests
//
// Canonical forms and their printed text.

use crate::{Engine, Value};

fn simplify(input: &str) -> String {
    Engine::default()
        .simplify(input)
        .unwrap_or_else(|e| panic!("failed to simplify {:?}: {}", input, e))
        .to_string()
}

// ==================== NUMBERS ====================

#[test]
fn test_integer_arithmetic() {
    assert_eq!(simplify("1 + 2 * 3"), "7");
    assert_eq!(simplify("2^10"), "1024");
}

#[test]
fn test_decimals_are_exact() {
    assert_eq!(simplify("0.1 + 0.2"), "3/10");
    assert_eq!(simplify("2.5 * 2"), "5");
}

#[test]
fn test_fractions_stay_exact() {
    assert_eq!(simplify("1/3 + 1/6"), "1/2");
}

#[test]
fn test_perfect_square_root() {
    assert_eq!(simplify("sqrt(16)"), "4");
    assert_eq!(simplify("sqrt(9/4)"), "3/2");
}

#[test]
fn test_irrational_root_stays_symbolic() {
    assert_eq!(simplify("sqrt(x)"), "sqrt(x)");
}

#[test]
fn test_coefficient_folds_into_large_power() {
    assert_eq!(simplify("2^5000*2"), "2^5001");
    assert_eq!(simplify("4*2^5000"), "2^5002");
    assert_eq!(simplify("2^5000/2"), "2^4999");
    assert_eq!(simplify("3*2^5000"), "3*2^5000");
}

// ==================== TERMS ====================

#[test]
fn test_like_terms_combine() {
    assert_eq!(simplify("x + x"), "2*x");
    assert_eq!(simplify("3*x - x"), "2*x");
    assert_eq!(simplify("x - x"), "0");
}

#[test]
fn test_equal_bases_combine() {
    assert_eq!(simplify("x * x"), "x^2");
    assert_eq!(simplify("x^2 * x^3"), "x^5");
    assert_eq!(simplify("2*x*3"), "6*x");
}

#[test]
fn test_trivial_powers() {
    assert_eq!(simplify("x^1"), "x");
    assert_eq!(simplify("x^0"), "1");
    assert_eq!(simplify("sqrt(x) * sqrt(x)"), "x");
}

#[test]
fn test_power_of_sum_expands() {
    assert_eq!(simplify("(x+1)^2"), "x^2+2*x+1");
}

#[test]
fn test_distribution() {
    assert_eq!(simplify("2*(x + 3)"), "2*x+6");
}

#[test]
fn test_order_is_deterministic() {
    assert_eq!(simplify("1 + x"), simplify("x + 1"));
    assert_eq!(simplify("y*x"), simplify("x*y"));
}

// ==================== DISPLAY ====================

#[test]
fn test_negation_display() {
    assert_eq!(simplify("-x"), "-x");
    assert_eq!(simplify("x - 2*y"), "x-2*y");
}

#[test]
fn test_quotient_display() {
    assert_eq!(simplify("x/2"), "x/2");
    assert_eq!(simplify("1/(x+1)"), "1/(x+1)");
}

// ==================== FUNCTIONS ====================

#[test]
fn test_functions_fold_at_exact_points() {
    assert_eq!(simplify("sin(0) + cos(0)"), "1");
    assert_eq!(simplify("exp(0)"), "1");
    assert_eq!(simplify("log(1)"), "0");
}

#[test]
fn test_ln_is_log() {
    assert_eq!(simplify("ln(x)"), "log(x)");
    assert_eq!(simplify("log(exp(x))"), "x");
}

#[test]
fn test_simplify_call_is_identity() {
    let engine = Engine::default();
    assert_eq!(engine.evaluate("simplify(x + x)"), engine.evaluate("2*x"));
}

#[test]
fn test_scalar_result_kind() {
    assert!(matches!(Engine::default().simplify("x"), Ok(Value::Scalar(_))));
}
