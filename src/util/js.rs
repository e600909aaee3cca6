//! `web-sys` glue shared by the browser views.
//!
//! Every helper turns a thrown `JsValue` into a typed error or an empty
//! result so callers never see exceptions. [`WebDom`] is the live
//! [`PageDom`] built from them.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use super::dom::PageDom;
use crate::error::DomError;

/// Best-effort text for a thrown JS value.
pub fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// The current document.
///
/// # Errors
///
/// Returns [`DomError::NoDocument`] outside a window context.
pub fn document() -> Result<Document, DomError> {
    web_sys::window().and_then(|w| w.document()).ok_or(DomError::NoDocument)
}

/// `<html>` of the current document.
///
/// # Errors
///
/// Returns [`DomError::NoDocument`] when there is no document or root element.
pub fn root_element() -> Result<Element, DomError> {
    document()?.document_element().ok_or(DomError::NoDocument)
}

/// All descendants of `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            log::debug!("query {selector} failed: {}", describe(&err));
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

/// `target[name]`, or `None` when missing, `null`, or the lookup throws.
pub fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    match js_sys::Reflect::get(target, &JsValue::from_str(name)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => Some(value),
        Ok(_) => None,
        Err(err) => {
            log::debug!("reading {name} failed: {}", describe(&err));
            None
        }
    }
}

fn mutation(err: &JsValue) -> DomError {
    DomError::Mutation(describe(err))
}

/// The live document.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebDom;

impl PageDom for WebDom {
    type Node = Element;

    fn has_element_id(&self, id: &str) -> bool {
        document().is_ok_and(|doc| doc.get_element_by_id(id).is_some())
    }

    fn append_style(&self, id: &str, css: &str) -> Result<(), DomError> {
        let doc = document()?;
        let head = doc.head().ok_or(DomError::TargetNotFound)?;
        let style = doc.create_element("style").map_err(|err| mutation(&err))?;
        style.set_id(id);
        style.set_text_content(Some(css));
        head.append_child(&style).map_err(|err| mutation(&err))?;
        Ok(())
    }

    fn query_all(&self, scope: Option<&Element>, selector: &str) -> Vec<Element> {
        match scope {
            Some(scope) => query_all(scope, selector),
            None => match root_element() {
                Ok(root) => query_all(&root, selector),
                Err(_) => Vec::new(),
            },
        }
    }

    fn query_one(&self, scope: &Element, selector: &str) -> Option<Element> {
        match scope.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("query {selector} failed: {}", describe(&err));
                None
            }
        }
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        match node.closest(selector) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("closest {selector} failed: {}", describe(&err));
                None
            }
        }
    }

    fn text(&self, node: &Element) -> Option<String> {
        node.text_content()
    }

    fn set_class(&self, node: &Element, class: &str, present: bool) -> Result<(), DomError> {
        let list = node.class_list();
        let result = if present { list.add_1(class) } else { list.remove_1(class) };
        result.map_err(|err| mutation(&err))
    }

    fn append_element(&self, parent: &Element, tag: &str, class: &str) -> Result<Element, DomError> {
        let created = document()?.create_element(tag).map_err(|err| mutation(&err))?;
        created.set_class_name(class);
        parent.append_child(&created).map_err(|err| mutation(&err))?;
        Ok(created)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> Result<(), DomError> {
        let Some(html) = node.dyn_ref::<web_sys::HtmlElement>() else {
            return Ok(());
        };
        html.style().set_property(property, value).map_err(|err| mutation(&err))
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        match root_element() {
            Ok(root) => root.get_attribute(name),
            Err(_) => None,
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        root_element()?.set_attribute(name, value).map_err(|err| mutation(&err))
    }

    fn on_click(&self, node: &Element, handler: Box<dyn Fn()>) -> Result<(), DomError> {
        let callback = Closure::<dyn Fn()>::new(move || handler());
        let bound = node
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(|err| mutation(&err));
        callback.forget();
        bound
    }
}
