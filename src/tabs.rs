// Tab controller
//
// Exactly one panel is visible at a time. Switching only touches the
// `active`/`hidden` classes, never the contents of a panel.

use crate::dom::Dom;
use log::debug;
use std::fmt;
use std::str::FromStr;

pub const PANEL_CLASS: &str = "tab-panel";
pub const BUTTON_CLASS: &str = "tab-button";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Basic,
    Symbolic,
    Solver,
    Matrix,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Basic, Panel::Symbolic, Panel::Solver, Panel::Matrix];

    /// Name used in element ids and `data-tab`
    pub fn key(self) -> &'static str {
        match self {
            Panel::Basic => "basic",
            Panel::Symbolic => "symbolic",
            Panel::Solver => "solver",
            Panel::Matrix => "matrix",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Basic => "Basic",
            Panel::Symbolic => "Symbolic",
            Panel::Solver => "Equation Solver",
            Panel::Matrix => "Matrix",
        }
    }

    pub fn panel_id(self) -> String {
        format!("tab-panel-{}", self.key())
    }

    pub fn button_id(self) -> String {
        format!("tab-button-{}", self.key())
    }
}

impl FromStr for Panel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Panel::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("unknown panel '{}'", s))
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Hide every panel and deactivate every tab button on the page, then show
/// `panel` and mark its button
pub fn show_tab(dom: &mut dyn Dom, panel: Panel) {
    debug!("show tab {}", panel);

    for id in dom.ids_with_class(PANEL_CLASS) {
        dom.add_class(&id, "hidden");
        dom.remove_class(&id, "active");
    }
    for id in dom.ids_with_class(BUTTON_CLASS) {
        dom.remove_class(&id, "active");
    }

    let panel_id = panel.panel_id();
    dom.remove_class(&panel_id, "hidden");
    dom.add_class(&panel_id, "active");
    dom.add_class(&panel.button_id(), "active");
}

/// The visible panel, if exactly one is marked active
pub fn active_tab(dom: &dyn Dom) -> Option<Panel> {
    let mut active = Panel::ALL
        .into_iter()
        .filter(|p| dom.has_class(&p.panel_id(), "active"));
    match (active.next(), active.next()) {
        (Some(panel), None) => Some(panel),
        _ => None,
    }
}
