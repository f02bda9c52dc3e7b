// Browser tests for WebDom
// Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use tabcalc::dom::{Dom, Element};
use tabcalc::web::WebDom;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

/// A document with an empty `<div id=host>` attached to the body
fn dom_with_host(host: &str) -> WebDom {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("browser document");
    let div = document.create_element("div").expect("create div");
    div.set_id(host);
    document
        .body()
        .expect("document body")
        .append_child(&div)
        .expect("attach host");
    WebDom::new(document)
}

#[wasm_bindgen_test]
fn test_replace_children_builds_nodes() {
    let mut dom = dom_with_host("host-build");
    dom.replace_children(
        "host-build",
        vec![
            Element::new("input")
                .with_id("cell-build")
                .with_class("matrix-cell")
                .with_attr("type", "text")
                .with_value("7"),
            Element::new("pre").with_id("out-build").with_text("<b>1 & 2</b>"),
        ],
    );

    assert_eq!(dom.child_ids("host-build"), vec!["cell-build", "out-build"]);
    assert_eq!(dom.value("cell-build").as_deref(), Some("7"));
    assert!(dom.has_class("cell-build", "matrix-cell"));
    assert_eq!(dom.attr("cell-build", "type").as_deref(), Some("text"));
    // Text stays text; nothing is parsed as markup
    assert_eq!(dom.text("out-build").as_deref(), Some("<b>1 & 2</b>"));
    assert!(dom.child_ids("out-build").is_empty());
}

#[wasm_bindgen_test]
fn test_replace_children_discards_previous() {
    let mut dom = dom_with_host("host-swap");
    dom.replace_children("host-swap", vec![Element::new("input").with_id("old-field")]);
    dom.replace_children("host-swap", vec![Element::new("input").with_id("new-field")]);

    assert_eq!(dom.child_ids("host-swap"), vec!["new-field"]);
    assert!(!dom.exists("old-field"));
}

#[wasm_bindgen_test]
fn test_select_value_picks_option() {
    let mut dom = dom_with_host("host-select");
    let options = ["2", "3", "4"]
        .into_iter()
        .map(|v| Element::new("option").with_attr("value", v).with_text(v));
    dom.replace_children(
        "host-select",
        vec![
            Element::new("select")
                .with_id("count-select")
                .with_children(options)
                .with_value("3"),
        ],
    );

    assert_eq!(dom.value("count-select").as_deref(), Some("3"));
}
