// Page layout
//
// The static element tree of the calculator. It is rendered to HTML for the
// browser and loaded into `MemoryDom` for the CLI and the tests, so element
// ids are defined in one place.

use crate::config::Settings;
use crate::dom::Element;
use crate::forms;
use crate::tabs::{BUTTON_CLASS, PANEL_CLASS, Panel};

/// Initial size of both matrix grids and of the equation set
const DEFAULT_GRID_SIZE: usize = 2;

/// Keypad buttons: (id, data-value, label), in grid order
pub const KEYS: [(&str, &str, &str); 19] = [
    ("key-clear", "C", "C"),
    ("key-clear-entry", "CE", "CE"),
    ("key-delete", "DEL", "DEL"),
    ("key-divide", "/", "÷"),
    ("key-7", "7", "7"),
    ("key-8", "8", "8"),
    ("key-9", "9", "9"),
    ("key-multiply", "*", "×"),
    ("key-4", "4", "4"),
    ("key-5", "5", "5"),
    ("key-6", "6", "6"),
    ("key-minus", "-", "−"),
    ("key-1", "1", "1"),
    ("key-2", "2", "2"),
    ("key-3", "3", "3"),
    ("key-plus", "+", "+"),
    ("key-0", "0", "0"),
    ("key-point", ".", "."),
    ("key-equals", "=", "="),
];

/// Id of the keypad button whose `data-value` is `value`
pub fn key_id(value: &str) -> Option<&'static str> {
    KEYS.iter().find(|(_, v, _)| *v == value).map(|(id, _, _)| *id)
}

pub const MATRIX_NAMES: [&str; 2] = ["matrixA", "matrixB"];

pub fn rows_selector(name: &str) -> String {
    format!("{}-rows", name)
}

pub fn cols_selector(name: &str) -> String {
    format!("{}-cols", name)
}

/// Whole calculator, basic tab active
pub fn page(settings: &Settings) -> Element {
    Element::new("div")
        .with_id("calculator")
        .with_class("calculator")
        .with_child(tab_bar())
        .with_child(panel(Panel::Basic).with_children(basic_panel()))
        .with_child(panel(Panel::Symbolic).with_children(symbolic_panel(settings)))
        .with_child(panel(Panel::Solver).with_children(solver_panel()))
        .with_child(panel(Panel::Matrix).with_children(matrix_panel(settings)))
}

/// Standalone HTML document that loads the wasm binding
pub fn document(settings: &Settings) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Tabbed Calculator</title>\n</head>\n<body>\n{}\n<script type=\"module\">import init from './pkg/tabcalc.js'; init();</script>\n</body>\n</html>\n",
        page(settings).to_html()
    )
}

fn tab_bar() -> Element {
    let buttons = Panel::ALL.into_iter().map(|p| {
        let button = Element::new("button")
            .with_id(&p.button_id())
            .with_class(BUTTON_CLASS)
            .with_attr("data-tab", p.key())
            .with_text(p.label());
        if p == Panel::Basic {
            button.with_class("active")
        } else {
            button
        }
    });
    Element::new("nav").with_class("tab-bar").with_children(buttons)
}

fn panel(p: Panel) -> Element {
    let section = Element::new("section")
        .with_id(&p.panel_id())
        .with_class(PANEL_CLASS);
    if p == Panel::Basic {
        section.with_class("active")
    } else {
        section.with_class("hidden")
    }
}

fn button(id: &str, label: &str) -> Element {
    Element::new("button").with_id(id).with_text(label)
}

fn result_region(id: &str) -> Element {
    Element::new("pre").with_id(id).with_class("result")
}

fn text_input(id: &str, placeholder: &str) -> Element {
    Element::new("input")
        .with_id(id)
        .with_attr("type", "text")
        .with_attr("placeholder", placeholder)
        .with_value("")
}

fn selector(id: &str, options: impl Iterator<Item = usize>, selected: usize) -> Element {
    let options = options.map(|n| {
        let text = n.to_string();
        Element::new("option").with_attr("value", &text).with_text(&text)
    });
    Element::new("select")
        .with_id(id)
        .with_value(&selected.to_string())
        .with_children(options)
}

// ==================== PANELS ====================

fn basic_panel() -> Vec<Element> {
    let keys = KEYS.iter().map(|(id, value, label)| {
        Element::new("button")
            .with_id(id)
            .with_class("calc-btn")
            .with_attr("data-value", value)
            .with_text(label)
    });
    vec![
        Element::new("div")
            .with_id("simple-display")
            .with_class("display")
            .with_text("0"),
        Element::new("div")
            .with_id("calc-grid")
            .with_class("calc-grid")
            .with_children(keys),
    ]
}

fn symbolic_panel(settings: &Settings) -> Vec<Element> {
    vec![
        text_input("calcInput", "e.g. x^2 + 2*x + 1"),
        text_input("calcVariable", &settings.default_variable),
        Element::new("div")
            .with_class("actions")
            .with_child(button("btnSimplify", "Simplify"))
            .with_child(button("btnIntegrate", "Integrate"))
            .with_child(button("btnDifferentiate", "Differentiate")),
        result_region("calcResult"),
    ]
}

fn solver_panel() -> Vec<Element> {
    let fields = forms::build_equation_fields(DEFAULT_GRID_SIZE).unwrap_or_default();
    vec![
        Element::new("label").with_text("Variables"),
        selector("varCount", 2..=forms::VARIABLE_POOL.len(), DEFAULT_GRID_SIZE),
        Element::new("div")
            .with_id(forms::EQUATIONS_CONTAINER)
            .with_class("equations")
            .with_children(fields),
        button("btnSolveSystem", "Solve System"),
        result_region("solverResult"),
    ]
}

fn matrix_panel(settings: &Settings) -> Vec<Element> {
    let max = settings.max_dimension;
    let size = DEFAULT_GRID_SIZE.min(max);

    let mut children: Vec<Element> = MATRIX_NAMES
        .iter()
        .map(|name| {
            let cells = forms::build_matrix_grid(name, size, size, max).unwrap_or_default();
            Element::new("div")
                .with_class("matrix-input")
                .with_child(Element::new("h3").with_text(&name.replace("matrix", "Matrix ")))
                .with_child(selector(&rows_selector(name), 1..=max, size))
                .with_child(selector(&cols_selector(name), 1..=max, size))
                .with_child(
                    Element::new("div")
                        .with_id(name)
                        .with_class("matrix-grid")
                        .with_attr("data-rows", &size.to_string())
                        .with_attr("data-cols", &size.to_string())
                        .with_children(cells),
                )
        })
        .collect();

    children.push(
        Element::new("div")
            .with_class("actions")
            .with_child(button("btnMatrixAdd", "A + B"))
            .with_child(button("btnMatrixMultiply", "A × B"))
            .with_child(button("btnMatrixDetA", "det(A)"))
            .with_child(button("btnMatrixInvA", "inverse(A)")),
    );
    children.push(result_region("matrixResult"));
    children
}
