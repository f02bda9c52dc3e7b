// Form Builder Tests

use crate::config::Settings;
use crate::dom::{Dom, MemoryDom};
use crate::error::FormatError;
use crate::forms::{
    build_equation_fields, build_matrix_grid, cell_id, read_equations, read_grid,
    regenerate_equations, regenerate_matrix,
};
use crate::layout;

// ==================== EQUATIONS ====================

#[test]
fn test_equation_ids() {
    let fields = build_equation_fields(3).expect("valid count");
    let ids: Vec<&str> = fields.iter().filter_map(|f| f.id.as_deref()).collect();
    assert_eq!(ids, vec!["eq1", "eq2", "eq3"]);
}

#[test]
fn test_equation_fields_are_empty_and_labeled() {
    let fields = build_equation_fields(2).expect("valid count");
    for field in &fields {
        assert_eq!(field.value.as_deref(), Some(""));
        assert_eq!(field.attr("data-vars"), Some("x, y"));
    }
}

#[test]
fn test_equation_count_bounds() {
    assert!(build_equation_fields(1).is_ok());
    assert!(build_equation_fields(4).is_ok());
    assert!(matches!(build_equation_fields(0), Err(FormatError::OutOfRange { .. })));
    assert!(matches!(build_equation_fields(5), Err(FormatError::OutOfRange { .. })));
}

// ==================== MATRIX GRIDS ====================

#[test]
fn test_grid_is_identity_like() {
    let cells = build_matrix_grid("matrixA", 2, 3, 5).expect("valid shape");
    let values: Vec<&str> = cells.iter().filter_map(|c| c.value.as_deref()).collect();
    assert_eq!(values, vec!["1", "0", "0", "0", "1", "0"]);
}

#[test]
fn test_grid_ids_row_major() {
    let cells = build_matrix_grid("matrixB", 2, 2, 5).expect("valid shape");
    let ids: Vec<&str> = cells.iter().filter_map(|c| c.id.as_deref()).collect();
    assert_eq!(
        ids,
        vec!["matrixB-r0-c0", "matrixB-r0-c1", "matrixB-r1-c0", "matrixB-r1-c1"]
    );
}

#[test]
fn test_grid_bounds() {
    assert!(matches!(
        build_matrix_grid("matrixA", 0, 2, 5),
        Err(FormatError::OutOfRange { what: "rows", .. })
    ));
    assert!(matches!(
        build_matrix_grid("matrixA", 2, 6, 5),
        Err(FormatError::OutOfRange { what: "columns", .. })
    ));
}

// ==================== REGENERATION ====================

fn page() -> MemoryDom {
    MemoryDom::new(layout::page(&Settings::default()))
}

#[test]
fn test_regeneration_discards_contents() {
    let mut dom = page();
    dom.set_value("eq1", "x = 1");
    regenerate_equations(&mut dom, 3).expect("valid count");
    assert_eq!(dom.child_ids("equations"), vec!["eq1", "eq2", "eq3"]);
    assert_eq!(dom.value("eq1").as_deref(), Some(""));
}

#[test]
fn test_regenerate_matrix_resets_cells() {
    let mut dom = page();
    dom.set_value(&cell_id("matrixA", 0, 0), "9");
    regenerate_matrix(&mut dom, "matrixA", 3, 1, 5).expect("valid shape");
    assert_eq!(read_grid(&dom, "matrixA", 3, 1), vec!["1", "0", "0"]);
    assert_eq!(dom.attr("matrixA", "data-cols").as_deref(), Some("1"));
}

#[test]
fn test_failed_regeneration_keeps_fields() {
    let mut dom = page();
    dom.set_value("eq1", "x = 1");
    assert!(regenerate_equations(&mut dom, 9).is_err());
    assert_eq!(dom.value("eq1").as_deref(), Some("x = 1"));
}

#[test]
fn test_read_equations_follows_container() {
    let mut dom = page();
    regenerate_equations(&mut dom, 4).expect("valid count");
    dom.set_value("eq2", "x = 1");
    assert_eq!(read_equations(&dom), vec!["", "x = 1", "", ""]);

    regenerate_equations(&mut dom, 2).expect("valid count");
    assert_eq!(read_equations(&dom), vec!["", ""]);
}
