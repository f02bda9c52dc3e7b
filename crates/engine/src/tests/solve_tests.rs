// Linear System Tests

use crate::{Engine, EngineError, Expr};

fn solve(equations: &[&str]) -> Result<Vec<(String, String)>, EngineError> {
    Engine::default().solve_equations(equations).map(|pairs| {
        pairs
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect()
    })
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}

// ==================== SOLVABLE SYSTEMS ====================

#[test]
fn test_two_by_two() {
    assert_eq!(
        solve(&["x + y = 3", "x - y = 1"]),
        Ok(pairs(&[("x", "2"), ("y", "1")]))
    );
}

#[test]
fn test_single_equation() {
    assert_eq!(solve(&["2*x = 4"]), Ok(pairs(&[("x", "2")])));
}

#[test]
fn test_fractional_solution() {
    assert_eq!(solve(&["2*x = 1"]), Ok(pairs(&[("x", "1/2")])));
}

#[test]
fn test_bare_expression_means_zero() {
    assert_eq!(solve(&["x - 5"]), Ok(pairs(&[("x", "5")])));
}

#[test]
fn test_results_sorted_by_name() {
    let result = solve(&["z + a = 3", "z - a = 1"]).expect("solvable");
    let names: Vec<&str> = result.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["a", "z"]);
}

#[test]
fn test_three_unknowns() {
    assert_eq!(
        solve(&["x + y + z = 6", "x - y = 0", "2*z = 6"]),
        Ok(pairs(&[("x", "3/2"), ("y", "3/2"), ("z", "3")]))
    );
}

#[test]
fn test_values_are_expressions() {
    let result = Engine::default().solve_equations(&["x = 7"]).expect("solvable");
    assert_eq!(result, vec![("x".to_string(), Expr::int(7))]);
}

// ==================== FAILURES ====================

#[test]
fn test_dependent_system() {
    assert_eq!(
        solve(&["x + y = 1", "2*x + 2*y = 2"]),
        Err(EngineError::NoUniqueSolution)
    );
}

#[test]
fn test_inconsistent_system() {
    assert_eq!(
        solve(&["x + y = 1", "x + y = 2"]),
        Err(EngineError::NoUniqueSolution)
    );
}

#[test]
fn test_nonlinear_system() {
    assert!(matches!(
        solve(&["x*y = 1", "x = 1"]),
        Err(EngineError::NonLinear(_))
    ));
}

#[test]
fn test_unknown_count_mismatch() {
    assert_eq!(
        solve(&["x + y = 1"]),
        Err(EngineError::SystemShape {
            equations: 1,
            unknowns: 2
        })
    );
}

#[test]
fn test_equation_parse_error() {
    assert!(matches!(solve(&["x + = 1"]), Err(EngineError::Parse(_))));
}
