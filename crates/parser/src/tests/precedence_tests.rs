// Operator Precedence Tests
//
// Tests to ensure correct operator precedence parsing.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::parse_expression;

fn parse_expr(input: &str) -> Result<Expr, String> {
    parse_expression(input).map_err(|e| format!("{:?}", e))
}

// ==================== ARITHMETIC PRECEDENCE ====================

#[test]
fn test_mul_over_add() {
    // 1 + 2 * 3 should be 1 + (2 * 3)
    let expr = parse_expr("1 + 2 * 3").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Add,
            rhs,
            ..
        } => match *rhs {
            Expr::Binary {
                op: BinaryOp::Mul, ..
            } => {} // Good
            _ => panic!("Mul should bind tighter than Add"),
        },
        _ => panic!("Expected Add at top"),
    }
}

#[test]
fn test_div_over_sub() {
    // 10 - 4 / 2 should be 10 - (4 / 2)
    let expr = parse_expr("10 - 4 / 2").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Sub,
            rhs,
            ..
        } => match *rhs {
            Expr::Binary {
                op: BinaryOp::Div, ..
            } => {}
            _ => panic!("Div should bind tighter"),
        },
        _ => panic!("Expected Sub"),
    }
}

#[test]
fn test_pow_over_mul() {
    // 2 * x ^ 4 should be 2 * (x ^ 4)
    let expr = parse_expr("2 * x ^ 4").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Mul,
            rhs,
            ..
        } => assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::Pow, .. })),
        _ => panic!("Expected Mul at top"),
    }
}

// ==================== ASSOCIATIVITY ====================

#[test]
fn test_sub_left_associative() {
    // 8 - 3 - 2 should be (8 - 3) - 2
    let expr = parse_expr("8 - 3 - 2").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Sub,
            lhs,
            rhs,
        } => {
            assert!(matches!(*lhs, Expr::Binary { op: BinaryOp::Sub, .. }));
            assert_eq!(*rhs, Expr::number("2"));
        }
        _ => panic!("Expected Sub at top"),
    }
}

#[test]
fn test_div_left_associative() {
    // 8 / 4 / 2 should be (8 / 4) / 2
    let expr = parse_expr("8 / 4 / 2").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Div,
            lhs,
            ..
        } => assert!(matches!(*lhs, Expr::Binary { op: BinaryOp::Div, .. })),
        _ => panic!("Expected Div at top"),
    }
}

#[test]
fn test_pow_right_associative() {
    // 2 ^ 3 ^ 2 should be 2 ^ (3 ^ 2)
    let expr = parse_expr("2 ^ 3 ^ 2").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Pow,
            lhs,
            rhs,
        } => {
            assert_eq!(*lhs, Expr::number("2"));
            assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::Pow, .. }));
        }
        _ => panic!("Expected Pow at top"),
    }
}

// ==================== UNARY PRECEDENCE ====================

#[test]
fn test_negation_looser_than_pow() {
    // -x ^ 2 should be -(x ^ 2)
    let expr = parse_expr("-x ^ 2").unwrap();
    match expr {
        Expr::Unary {
            op: UnaryOp::Negate,
            expr,
        } => assert!(matches!(*expr, Expr::Binary { op: BinaryOp::Pow, .. })),
        _ => panic!("Expected Negate at top"),
    }
}

#[test]
fn test_negation_tighter_than_mul() {
    // -2 * x should be (-2) * x
    let expr = parse_expr("-2 * x").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Mul,
            lhs,
            ..
        } => assert!(matches!(*lhs, Expr::Unary { .. })),
        _ => panic!("Expected Mul at top"),
    }
}

#[test]
fn test_signed_exponent() {
    // 2 ^ -1 should be 2 ^ (-1)
    let expr = parse_expr("2 ^ -1").unwrap();
    match expr {
        Expr::Binary {
            op: BinaryOp::Pow,
            rhs,
            ..
        } => assert!(matches!(*rhs, Expr::Unary { .. })),
        _ => panic!("Expected Pow at top"),
    }
}

#[test]
fn test_parens_override_precedence() {
    // (1 + 2) * 3 should have Mul at top
    let expr = parse_expr("(1 + 2) * 3").unwrap();
    assert!(matches!(expr, Expr::Binary { op: BinaryOp::Mul, .. }));
}
