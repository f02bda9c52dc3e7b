// Error Tests
//
// Failures surfaced by the engine entry points.

use crate::{Engine, EngineError};

#[test]
fn test_parse_error_is_summarized() {
    match Engine::default().evaluate("1 +") {
        Err(EngineError::Parse(msg)) => assert!(msg.contains("end of input"), "got: {}", msg),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_unknown_function() {
    assert_eq!(
        Engine::default().evaluate("foo(1)"),
        Err(EngineError::UnknownFunction("foo".to_string()))
    );
}

#[test]
fn test_division_by_zero() {
    assert_eq!(Engine::default().evaluate("1/0"), Err(EngineError::DivisionByZero));
    assert_eq!(Engine::default().evaluate("x/(x-x)"), Err(EngineError::DivisionByZero));
}

#[test]
fn test_wrong_arity() {
    assert!(matches!(
        Engine::default().evaluate("det([[1]], [[2]])"),
        Err(EngineError::Arity { found: 2, .. })
    ));
}

#[test]
fn test_det_of_scalar() {
    assert_eq!(Engine::default().evaluate("det(5)"), Err(EngineError::ExpectedMatrix));
}

#[test]
fn test_calculus_needs_scalar() {
    assert_eq!(
        Engine::default().diff("[[x]]", "x"),
        Err(EngineError::ExpectedScalar)
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(EngineError::Singular.to_string(), "matrix is singular");
    assert_eq!(
        EngineError::NotSquare { rows: 2, cols: 3 }.to_string(),
        "matrix must be square, found 2x3"
    );
}
