// Tab Controller Tests

use crate::config::Settings;
use crate::dom::{Dom, MemoryDom};
use crate::layout;
use crate::tabs::{Panel, active_tab, show_tab};

fn page() -> MemoryDom {
    MemoryDom::new(layout::page(&Settings::default()))
}

#[test]
fn test_basic_is_initially_active() {
    assert_eq!(active_tab(&page()), Some(Panel::Basic));
}

#[test]
fn test_exactly_one_panel_visible() {
    let mut dom = page();
    for panel in Panel::ALL {
        show_tab(&mut dom, panel);
        assert_eq!(active_tab(&dom), Some(panel));
        for other in Panel::ALL {
            let visible = !dom.has_class(&other.panel_id(), "hidden");
            assert_eq!(visible, other == panel, "{} while showing {}", other, panel);
            assert_eq!(dom.has_class(&other.button_id(), "active"), other == panel);
        }
    }
}

#[test]
fn test_show_tab_is_idempotent() {
    let mut dom = page();
    show_tab(&mut dom, Panel::Matrix);
    let once = dom.root().clone();
    show_tab(&mut dom, Panel::Matrix);
    assert_eq!(dom.root(), &once);
}

#[test]
fn test_panel_names() {
    assert_eq!("solver".parse(), Ok(Panel::Solver));
    assert!("graph".parse::<Panel>().is_err());
    assert_eq!(Panel::Symbolic.panel_id(), "tab-panel-symbolic");
    assert_eq!(Panel::Symbolic.button_id(), "tab-button-symbolic");
}

#[test]
fn test_tab_buttons_carry_data_tab() {
    let dom = page();
    let ids = dom.ids_with_class("tab-button");
    assert_eq!(ids.len(), 4);
    for (id, panel) in ids.iter().zip(Panel::ALL) {
        assert_eq!(dom.attr(id, "data-tab").as_deref(), Some(panel.key()));
    }
}
