//! Page DOM operations the widgets need, behind one trait.
//!
//! DESIGN
//! ======
//! Render sequences (style injection, lookups, class and style writes) are
//! written once against [`PageDom`]. The hydrate build plugs in `WebDom`;
//! tests plug in an in-memory tree that records every mutation.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use crate::error::DomError;
use crate::util::lookup::{LookupStrategy, first_match};

/// Minimal document surface.
pub trait PageDom {
    /// Element handle.
    type Node: Clone + 'static;

    fn has_element_id(&self, id: &str) -> bool;

    /// Append `<style id=...>css</style>` to `<head>`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] when there is no head or the append throws.
    fn append_style(&self, id: &str, css: &str) -> Result<(), DomError>;

    /// Descendants of `scope` matching `selector` in document order; the
    /// whole document when `scope` is `None`.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    fn query_one(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node> {
        self.query_all(Some(scope), selector).into_iter().next()
    }

    /// Closest inclusive ancestor of `node` matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn text(&self, node: &Self::Node) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`DomError::Mutation`] when the class list rejects the token.
    fn set_class(&self, node: &Self::Node, class: &str, present: bool) -> Result<(), DomError>;

    /// Create `<tag class=...>` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Mutation`] when creation or the append throws.
    fn append_element(&self, parent: &Self::Node, tag: &str, class: &str) -> Result<Self::Node, DomError>;

    /// # Errors
    ///
    /// Returns [`DomError::Mutation`] when the style write throws.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<(), DomError>;

    fn root_attribute(&self, name: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`DomError`] when there is no root element.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;

    /// Run `handler` on every click of `node` for the rest of the page.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Mutation`] when the listener cannot be attached.
    fn on_click(&self, node: &Self::Node, handler: Box<dyn Fn()>) -> Result<(), DomError>;
}

/// Append the stylesheet unless an element with `id` already exists.
///
/// # Errors
///
/// Propagates [`PageDom::append_style`] failures.
pub fn inject_style_once<D: PageDom + ?Sized>(dom: &D, id: &str, css: &str) -> Result<(), DomError> {
    if dom.has_element_id(id) {
        return Ok(());
    }
    dom.append_style(id, css)
}

/// Container found by the first strategy that resolves.
pub fn find_container<D: PageDom + ?Sized>(dom: &D, strategies: &[LookupStrategy]) -> Option<D::Node> {
    first_match(strategies, |strategy| {
        dom.query_all(None, &strategy.candidate_selector())
            .into_iter()
            .filter(|node| strategy.accepts_text(dom.text(node).as_deref()))
            .find_map(|node| dom.closest(&node, strategy.container()))
    })
}
