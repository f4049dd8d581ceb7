//! DOM Helpers
//!
//! Thin wrappers over web-sys lookups. Missing elements are normal on
//! server-rendered pages, so lookups return `Option` and writes are no-ops.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(|list| node_list_elements(&list))
        .unwrap_or_default()
}

pub fn query_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| node_list_elements(&list))
        .unwrap_or_default()
}

fn node_list_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn exists(selector: &str) -> bool {
    query(selector).is_some()
}

pub fn set_text_all(selector: &str, text: &str) {
    for el in query_all(selector) {
        el.set_text_content(Some(text));
    }
}

pub fn text_of(selector: &str) -> Option<String> {
    query(selector).and_then(|el| el.text_content()).map(|t| t.trim().to_string())
}

/// `display` style on every match; `None` clears it
pub fn set_display_all(selector: &str, display: Option<&str>) {
    for el in query_all(selector) {
        set_style(&el, "display", display);
    }
}

pub fn set_style(el: &Element, property: &str, value: Option<&str>) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let style = html.style();
        let _ = match value {
            Some(v) => style.set_property(property, v),
            None => style.remove_property(property).map(|_| ()),
        };
    }
}

pub fn remove_all(selector: &str) {
    for el in query_all(selector) {
        el.remove();
    }
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Value of an input, select or textarea
pub fn control_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        el.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
    }
}

pub fn set_control_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

pub fn input_value(selector: &str) -> Option<String> {
    query(selector).and_then(|el| control_value(&el))
}

pub fn set_input_value(selector: &str, value: &str) {
    if let Some(el) = query(selector) {
        set_control_value(&el, value);
    }
}

/// Named controls of a form as `(name, value, required)`.
/// Unchecked radios and checkboxes are skipped, like a browser submit does.
pub fn form_controls(form: &Element) -> Vec<(String, String, bool)> {
    query_within(form, "input, select, textarea")
        .into_iter()
        .filter_map(|el| {
            let name = el.get_attribute("name").filter(|n| !n.is_empty())?;
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                let kind = input.type_();
                if (kind == "radio" || kind == "checkbox") && !input.checked() {
                    return None;
                }
                if kind == "submit" || kind == "button" || kind == "file" {
                    return None;
                }
            }
            let required = el.has_attribute("required");
            Some((name, control_value(&el).unwrap_or_default(), required))
        })
        .collect()
}

pub fn click(selector: &str) -> bool {
    match query(selector).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
        Some(el) => {
            el.click();
            true
        }
        None => false,
    }
}

pub fn focus(selector: &str) {
    if let Some(el) = query(selector).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
        let _ = el.focus();
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn reload() {
    if let Some(win) = web_sys::window() {
        let _ = win.location().reload();
    }
}

pub fn navigate(url: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(url);
    }
}

pub fn location_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

pub fn location_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

pub fn scroll_to_top() {
    if let Some(win) = web_sys::window() {
        let opts = web_sys::ScrollToOptions::new();
        opts.set_top(0.0);
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&opts);
    }
}

/// Create an element, optionally with a class
pub fn create(tag: &str, class: Option<&str>) -> Option<Element> {
    let el = document()?.create_element(tag).ok()?;
    if let Some(class) = class {
        el.set_class_name(class);
    }
    Some(el)
}
