// Document model used by the page logic
//
// Handlers only talk to a `Dom`: look elements up by id, read and write text
// and form values, toggle classes and replace a container's children. The
// in-memory implementation backs the CLI and the tests; the browser one lives
// in `web.rs`.

use log::debug;

pub trait Dom {
    /// Text content of the element
    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&mut self, id: &str, text: &str);

    /// Current value of a form control (input, select, textarea).
    /// `None` for missing elements and for elements that hold no value.
    fn value(&self, id: &str) -> Option<String>;
    fn set_value(&mut self, id: &str, value: &str);

    fn has_class(&self, id: &str, class: &str) -> bool;
    fn add_class(&mut self, id: &str, class: &str);
    fn remove_class(&mut self, id: &str, class: &str);

    fn attr(&self, id: &str, name: &str) -> Option<String>;
    fn set_attr(&mut self, id: &str, name: &str, value: &str);

    /// Ids of every element carrying `class`, in document order
    fn ids_with_class(&self, class: &str) -> Vec<String>;

    /// Ids of the direct children of the element, in order
    fn child_ids(&self, id: &str) -> Vec<String>;

    /// Drop the element's children and insert `children` in their place
    fn replace_children(&mut self, id: &str, children: Vec<Element>);

    fn exists(&self, id: &str) -> bool;
}

// ==================== ELEMENT ====================

/// Detached element tree, built by the layout and the form builder
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub value: Option<String>,
    pub children: Vec<Element>,
}

/// Tags written without a closing tag
const VOID_TAGS: [&str; 3] = ["input", "br", "hr"];

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.put_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn put_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search by id
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    fn collect_class(&self, class: &str, out: &mut Vec<String>) {
        if let (true, Some(id)) = (self.has_class(class), &self.id) {
            out.push(id.clone());
        }
        for child in &self.children {
            child.collect_class(class, out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, None);
        out
    }

    /// `selected` is the value of the enclosing select, if any
    fn write_html(&self, out: &mut String, selected: Option<&str>) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            push_attr(out, "id", id);
        }
        if !self.classes.is_empty() {
            push_attr(out, "class", &self.classes.join(" "));
        }
        for (name, value) in &self.attrs {
            push_attr(out, name, value);
        }

        match self.tag.as_str() {
            "input" => {
                if let Some(value) = &self.value {
                    push_attr(out, "value", value);
                }
            }
            "option" => {
                if selected.is_some() && self.attr("value") == selected {
                    out.push_str(" selected");
                }
            }
            _ => {}
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        if self.tag == "textarea" {
            out.push_str(&escape(self.value.as_deref().unwrap_or("")));
        } else {
            out.push_str(&escape(&self.text));
        }

        let inner_selected = if self.tag == "select" {
            self.value.as_deref()
        } else {
            None
        };
        for child in &self.children {
            child.write_html(out, inner_selected);
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ==================== IN-MEMORY DOM ====================

/// Headless document holding one element tree
#[derive(Debug, Clone)]
pub struct MemoryDom {
    root: Element,
}

impl MemoryDom {
    pub fn new(root: Element) -> Self {
        MemoryDom { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    fn with_element<F: FnOnce(&mut Element)>(&mut self, id: &str, f: F) {
        match self.root.find_mut(id) {
            Some(element) => f(element),
            None => debug!("no element with id '{}'", id),
        }
    }
}

impl Dom for MemoryDom {
    fn text(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.with_element(id, |e| e.text = text.to_string());
    }

    fn value(&self, id: &str) -> Option<String> {
        self.element(id).and_then(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.with_element(id, |e| e.value = Some(value.to_string()));
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    fn add_class(&mut self, id: &str, class: &str) {
        self.with_element(id, |e| {
            if !e.has_class(class) {
                e.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        self.with_element(id, |e| e.classes.retain(|c| c != class));
    }

    fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.element(id).and_then(|e| e.attr(name)).map(str::to_string)
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) {
        self.with_element(id, |e| e.put_attr(name, value));
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.root.collect_class(class, &mut out);
        out
    }

    fn child_ids(&self, id: &str) -> Vec<String> {
        self.element(id)
            .map(|e| e.children.iter().filter_map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }

    fn replace_children(&mut self, id: &str, children: Vec<Element>) {
        self.with_element(id, |e| e.children = children);
    }

    fn exists(&self, id: &str) -> bool {
        self.element(id).is_some()
    }
}
