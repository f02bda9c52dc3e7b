// Browser binding
//
// `WebDom` implements `Dom` on top of the real document. Element trees from
// the layout and the form builder become real nodes through `create_element`,
// never through HTML strings. `start` injects the page if the host HTML does
// not already contain it, then forwards every click and change event to a
// shared `App`.

use crate::app::{App, Event};
use crate::config::Settings;
use crate::dom::{Dom, Element};
use crate::layout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCollection, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, console};

pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        WebDom { document }
    }

    fn get(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }
}

/// Build a detached node for `element` and its children
fn build_node(document: &Document, element: &Element) -> Result<web_sys::Element, JsValue> {
    let node = document.create_element(&element.tag)?;
    if let Some(id) = &element.id {
        node.set_id(id);
    }
    if !element.classes.is_empty() {
        node.set_class_name(&element.classes.join(" "));
    }
    for (name, value) in &element.attrs {
        node.set_attribute(name, value)?;
    }
    if !element.text.is_empty() {
        node.set_text_content(Some(&element.text));
    }
    for child in &element.children {
        node.append_child(&build_node(document, child)?)?;
    }
    // After the children, so a select can pick one of its options
    if let Some(value) = &element.value {
        set_field_value(&node, value);
    }
    Ok(node)
}

fn set_field_value(el: &web_sys::Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

fn warn_on_failure(action: &str, id: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        console::warn_2(&JsValue::from_str(&format!("{} on #{} failed", action, id)), &err);
    }
}

fn collection_ids(list: &HtmlCollection) -> Vec<String> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|e| e.id())
        .filter(|id| !id.is_empty())
        .collect()
}

impl Dom for WebDom {
    fn text(&self, id: &str) -> Option<String> {
        self.get(id).map(|e| e.text_content().unwrap_or_default())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(e) = self.get(id) {
            e.set_text_content(Some(text));
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        let el = self.get(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            return Some(select.value());
        }
        el.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(el) = self.get(id) {
            set_field_value(&el, value);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.class_list().contains(class))
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(e) = self.get(id) {
            warn_on_failure("adding a class", id, e.class_list().add_1(class));
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(e) = self.get(id) {
            warn_on_failure("removing a class", id, e.class_list().remove_1(class));
        }
    }

    fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.get(id).and_then(|e| e.get_attribute(name))
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) {
        if let Some(e) = self.get(id) {
            warn_on_failure("setting an attribute", id, e.set_attribute(name, value));
        }
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        collection_ids(&self.document.get_elements_by_class_name(class))
    }

    fn child_ids(&self, id: &str) -> Vec<String> {
        self.get(id)
            .map(|e| collection_ids(&e.children()))
            .unwrap_or_default()
    }

    fn replace_children(&mut self, id: &str, children: Vec<Element>) {
        let Some(e) = self.get(id) else { return };
        e.set_text_content(None);
        for child in &children {
            let appended = build_node(&self.document, child)
                .and_then(|node| e.append_child(&node))
                .map(|_| ());
            warn_on_failure("adding a child", id, appended);
        }
    }

    fn exists(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let settings = Settings::default();

    if document.get_element_by_id("calculator").is_none() {
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
        let page = build_node(&document, &layout::page(&settings))?;
        body.prepend_with_node_1(&page)?;
    }

    let app = App::new(settings);
    if !app.engine().engine().self_test() {
        console::error_1(&JsValue::from_str(
            "symbolic engine failed its self-test; complex math will fail",
        ));
    }
    console::info_1(&JsValue::from_str(&format!(
        "matrix evaluation: {}",
        app.settings().matrix_eval
    )));

    let dom = Rc::new(RefCell::new(WebDom::new(document.clone())));
    let app = Rc::new(RefCell::new(app));
    app.borrow_mut().mount(&mut *dom.borrow_mut());

    listen(&document, "click", Event::Click, app.clone(), dom.clone())?;
    listen(&document, "change", Event::Change, app, dom)?;
    Ok(())
}

fn listen(
    document: &Document,
    kind: &str,
    make: fn(String) -> Event,
    app: Rc<RefCell<App>>,
    dom: Rc<RefCell<WebDom>>,
) -> Result<(), JsValue> {
    let handler = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        let Some(id) = target_id(&ev) else { return };
        app.borrow_mut().handle(&mut *dom.borrow_mut(), &make(id));
    }) as Box<dyn FnMut(web_sys::Event)>);

    document.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Id of the event target or of its nearest ancestor with one
fn target_id(ev: &web_sys::Event) -> Option<String> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let el = target.closest("[id]").ok()??;
    Some(el.id())
}
