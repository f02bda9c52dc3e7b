// Matrix Tests
//
// Matrix literals, arithmetic, determinants and inverses in both
// evaluation modes.

use crate::{Engine, EngineError, EngineSettings, MatrixEvalMethod, Value};

fn eval_with(method: MatrixEvalMethod, input: &str) -> Result<String, EngineError> {
    Engine::new(EngineSettings { matrix_eval: method })
        .evaluate(input)
        .map(|v| v.to_string())
}

fn eval(input: &str) -> Result<String, EngineError> {
    eval_with(MatrixEvalMethod::Symbolic, input)
}

fn ok(text: &str) -> Result<String, EngineError> {
    Ok(text.to_string())
}

/// `I + J` (2 on the diagonal, 1 elsewhere) with the top-left entry replaced
fn ones_plus_identity(n: usize, corner: &str) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| {
            let cells: Vec<&str> = (0..n)
                .map(|j| match (i, j) {
                    (0, 0) => corner,
                    _ if i == j => "2",
                    _ => "1",
                })
                .collect();
            format!("[{}]", cells.join(","))
        })
        .collect();
    format!("[{}]", rows.join(","))
}

// ==================== LITERALS ====================

#[test]
fn test_matrix_literal_round_trips() {
    assert_eq!(eval("[[1,2],[3,4]]"), ok("[[1,2],[3,4]]"));
}

#[test]
fn test_flat_list_is_row() {
    let value = Engine::default().evaluate("[1, 2, 3]").expect("valid");
    match value {
        Value::Matrix(m) => assert_eq!((m.rows(), m.cols()), (1, 3)),
        other => panic!("expected matrix, got {}", other),
    }
}

#[test]
fn test_ragged_rows() {
    assert!(matches!(eval("[[1,2],[3]]"), Err(EngineError::ShapeMismatch(_))));
}

// ==================== ARITHMETIC ====================

#[test]
fn test_add() {
    assert_eq!(eval("([[1,2],[3,4]]) + ([[1,1],[1,1]])"), ok("[[2,3],[4,5]]"));
}

#[test]
fn test_multiply() {
    assert_eq!(eval("([[1,2],[3,4]]) * ([[1,0],[0,1]])"), ok("[[1,2],[3,4]]"));
    assert_eq!(eval("[[1,2]] * [[3],[4]]"), ok("[[11]]"));
}

#[test]
fn test_scalar_broadcast() {
    assert_eq!(eval("2 * [[1,2],[3,4]]"), ok("[[2,4],[6,8]]"));
}

#[test]
fn test_shape_mismatch() {
    assert!(matches!(eval("[[1,2]] + [[1],[2]]"), Err(EngineError::ShapeMismatch(_))));
    assert!(matches!(eval("[[1,2]] * [[1,2]]"), Err(EngineError::ShapeMismatch(_))));
}

#[test]
fn test_matrix_power() {
    assert_eq!(eval("[[1,2],[3,4]]^2"), ok("[[7,10],[15,22]]"));
}

#[test]
fn test_matrix_power_large_exponent() {
    assert_eq!(eval("[[1]]^1000000000000"), ok("[[1]]"));
    assert_eq!(eval("[[1,1],[0,1]]^1000000"), ok("[[1,1000000],[0,1]]"));
    assert_eq!(eval("[[2,0],[0,1]]^-3"), ok("[[1/8,0],[0,1]]"));
}

#[test]
fn test_transpose() {
    assert_eq!(eval("transpose([[1,2],[3,4]])"), ok("[[1,3],[2,4]]"));
}

// ==================== DETERMINANT ====================

#[test]
fn test_identity_determinant() {
    assert_eq!(eval("det([[1,0],[0,1]])"), ok("1"));
}

#[test]
fn test_determinant_both_methods() {
    for method in [MatrixEvalMethod::Symbolic, MatrixEvalMethod::Numeric] {
        assert_eq!(eval_with(method, "det([[1,2],[3,4]])"), ok("-2"));
        assert_eq!(eval_with(method, "det([[2,0,1],[1,3,2],[1,1,2]])"), ok("6"));
    }
}

#[test]
fn test_symbolic_determinant() {
    assert_eq!(eval("det([[a,b],[c,d]])"), ok("a*d-b*c"));
}

#[test]
fn test_large_numeric_determinant() {
    // det(I + J) = n + 1
    let a = ones_plus_identity(8, "2");
    for method in [MatrixEvalMethod::Symbolic, MatrixEvalMethod::Numeric] {
        assert_eq!(eval_with(method, &format!("det({})", a)), ok("9"));
    }
}

#[test]
fn test_large_symbolic_determinant() {
    // Linear in the corner entry: 8 + 7*(x - 1)
    let a = ones_plus_identity(7, "x+1");
    assert_eq!(eval(&format!("det({})", a)), ok("7*x+1"));
}

#[test]
fn test_numeric_rejects_symbols() {
    assert!(matches!(
        eval_with(MatrixEvalMethod::Numeric, "det([[a,1],[0,1]])"),
        Err(EngineError::NonNumericEntry(_))
    ));
}

#[test]
fn test_determinant_not_square() {
    assert_eq!(
        eval("det([[1,2,3],[4,5,6]])"),
        Err(EngineError::NotSquare { rows: 2, cols: 3 })
    );
}

// ==================== INVERSE ====================

#[test]
fn test_inverse_both_methods() {
    for method in [MatrixEvalMethod::Symbolic, MatrixEvalMethod::Numeric] {
        assert_eq!(eval_with(method, "invert([[1,2],[3,4]])"), ok("[[-2,1],[3/2,-1/2]]"));
    }
}

#[test]
fn test_large_numeric_inverse() {
    // inv(I + J) = I - J/(n + 1)
    let n = 8;
    let expected: Vec<String> = (0..n)
        .map(|i| {
            let cells: Vec<&str> = (0..n).map(|j| if i == j { "8/9" } else { "-1/9" }).collect();
            format!("[{}]", cells.join(","))
        })
        .collect();
    let expected = format!("[{}]", expected.join(","));

    let a = ones_plus_identity(n, "2");
    for method in [MatrixEvalMethod::Symbolic, MatrixEvalMethod::Numeric] {
        assert_eq!(eval_with(method, &format!("invert({})", a)), ok(&expected));
    }
}

#[test]
fn test_inverse_of_one_by_one() {
    assert_eq!(eval("invert([[4]])"), ok("[[1/4]]"));
}

#[test]
fn test_singular_inverse() {
    for method in [MatrixEvalMethod::Symbolic, MatrixEvalMethod::Numeric] {
        assert_eq!(eval_with(method, "invert([[1,2],[2,4]])"), Err(EngineError::Singular));
    }
}

#[test]
fn test_inverse_times_matrix_is_identity() {
    assert_eq!(
        eval("invert([[2,1],[1,1]]) * [[2,1],[1,1]]"),
        ok("[[1,0],[0,1]]")
    );
}

// ==================== SETTINGS ====================

#[test]
fn test_method_from_str() {
    assert_eq!("numeric".parse(), Ok(MatrixEvalMethod::Numeric));
    assert_eq!("Symbolic".parse(), Ok(MatrixEvalMethod::Symbolic));
    assert!("gauss".parse::<MatrixEvalMethod>().is_err());
}

#[test]
fn test_set_matrix_eval() {
    let mut engine = Engine::default();
    assert_eq!(engine.settings().matrix_eval, MatrixEvalMethod::Symbolic);
    engine.set_matrix_eval(MatrixEvalMethod::Numeric);
    assert_eq!(engine.settings().matrix_eval, MatrixEvalMethod::Numeric);
}

#[test]
fn test_self_test_passes() {
    assert!(Engine::default().self_test());
}
