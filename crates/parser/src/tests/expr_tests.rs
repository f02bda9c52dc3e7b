// Expression Parsing Tests
//
// AST shapes produced by the full expression grammar.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::{parse_equation, parse_expression};

fn parse(input: &str) -> Expr {
    parse_expression(input).unwrap_or_else(|e| panic!("failed to parse {:?}: {:?}", input, e))
}

fn bin(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

// ==================== ATOMS ====================

#[test]
fn test_number_literal() {
    assert_eq!(parse("42"), Expr::number("42"));
    assert_eq!(parse("0.25"), Expr::number("0.25"));
}

#[test]
fn test_identifier() {
    assert_eq!(parse("theta"), Expr::ident("theta"));
}

#[test]
fn test_parenthesized() {
    assert_eq!(parse("((x))"), Expr::ident("x"));
}

// ==================== CALLS ====================

#[test]
fn test_call_single_argument() {
    assert_eq!(
        parse("sin(x)"),
        Expr::Call {
            func: "sin".to_string(),
            args: vec![Expr::ident("x")]
        }
    );
}

#[test]
fn test_call_multiple_arguments() {
    match parse("diff(x^2, x)") {
        Expr::Call { func, args } => {
            assert_eq!(func, "diff");
            assert_eq!(args.len(), 2);
            assert_eq!(args[1], Expr::ident("x"));
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_call_wrapping_matrix() {
    match parse("det([[1,2],[3,4]])") {
        Expr::Call { func, args } => {
            assert_eq!(func, "det");
            assert!(matches!(args[0], Expr::List(ref rows) if rows.len() == 2));
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

// ==================== MATRIX LITERALS ====================

#[test]
fn test_matrix_literal() {
    assert_eq!(
        parse("[[1,0],[0,1]]"),
        Expr::List(vec![
            Expr::List(vec![Expr::number("1"), Expr::number("0")]),
            Expr::List(vec![Expr::number("0"), Expr::number("1")]),
        ])
    );
}

#[test]
fn test_matrix_cells_are_expressions() {
    match parse("[[a+1, 2*b]]") {
        Expr::List(rows) => match &rows[0] {
            Expr::List(cells) => {
                assert!(matches!(cells[0], Expr::Binary { op: BinaryOp::Add, .. }));
                assert!(matches!(cells[1], Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("Expected row, got {:?}", other),
        },
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_embedded_operands() {
    // The page formats matrix operations as (A) + (B)
    assert_eq!(
        parse("([[1]]) * ([[2]])"),
        bin(
            BinaryOp::Mul,
            Expr::List(vec![Expr::List(vec![Expr::number("1")])]),
            Expr::List(vec![Expr::List(vec![Expr::number("2")])]),
        )
    );
}

// ==================== UNARY ====================

#[test]
fn test_negation() {
    assert_eq!(
        parse("-x"),
        Expr::Unary {
            op: UnaryOp::Negate,
            expr: Box::new(Expr::ident("x"))
        }
    );
}

#[test]
fn test_unary_plus_is_dropped() {
    assert_eq!(parse("+x"), Expr::ident("x"));
}

// ==================== EQUATIONS ====================

#[test]
fn test_equation_sides() {
    let eq = parse_equation("x + y = 3").unwrap();
    assert_eq!(eq.lhs, bin(BinaryOp::Add, Expr::ident("x"), Expr::ident("y")));
    assert_eq!(eq.rhs, Expr::number("3"));
}

#[test]
fn test_bare_expression_equals_zero() {
    let eq = parse_equation("2*x - 4").unwrap();
    assert_eq!(eq.rhs, Expr::number("0"));
}

#[test]
fn test_two_equals_signs_rejected() {
    assert!(parse_equation("x = 1 = 2").is_err());
}

#[test]
fn test_equals_rejected_in_expression() {
    assert!(parse_expression("x = 1").is_err());
}
