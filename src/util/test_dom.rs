//! In-memory [`PageDom`] for unit tests.
//!
//! Nodes are indices into a flat arena. A node matches a selector when the
//! selector was registered on it with [`FakeDom::answer`], or when the
//! selector is a simple compound (`tag.class.class`) it satisfies.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::dom::PageDom;
use crate::error::DomError;

#[derive(Default)]
struct FakeNode {
    parent: Option<usize>,
    tag: String,
    classes: Vec<String>,
    answers: Vec<String>,
    text: Option<String>,
    styles: HashMap<String, String>,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<FakeNode>,
    style_ids: Vec<String>,
    style_appends: usize,
    root_attributes: HashMap<String, String>,
    handlers: Vec<(usize, Rc<dyn Fn()>)>,
}

/// Shared handle; clones see the same tree.
#[derive(Clone, Default)]
pub struct FakeDom {
    tree: Rc<RefCell<Tree>>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `<tag class="...">` under `parent` and return its handle.
    pub fn add(&self, parent: Option<usize>, tag: &str, classes: &[&str]) -> usize {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(FakeNode {
            parent,
            tag: tag.to_owned(),
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            ..FakeNode::default()
        });
        tree.nodes.len() - 1
    }

    /// Make `node` match `selector` verbatim.
    pub fn answer(&self, node: usize, selector: &str) {
        if let Some(n) = self.tree.borrow_mut().nodes.get_mut(node) {
            n.answers.push(selector.to_owned());
        }
    }

    pub fn set_text(&self, node: usize, text: &str) {
        if let Some(n) = self.tree.borrow_mut().nodes.get_mut(node) {
            n.text = Some(text.to_owned());
        }
    }

    /// Number of stylesheets actually appended.
    pub fn style_appends(&self) -> usize {
        self.tree.borrow().style_appends
    }

    pub fn has_class(&self, node: usize, class: &str) -> bool {
        self.tree.borrow().nodes.get(node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn style(&self, node: usize, property: &str) -> Option<String> {
        self.tree.borrow().nodes.get(node).and_then(|n| n.styles.get(property).cloned())
    }

    /// Direct children of `parent` carrying `class`.
    pub fn children_with_class(&self, parent: usize, class: &str) -> Vec<usize> {
        let tree = self.tree.borrow();
        (0..tree.nodes.len())
            .filter(|&i| tree.nodes[i].parent == Some(parent) && tree.nodes[i].classes.iter().any(|c| c == class))
            .collect()
    }

    pub fn handler_count(&self, node: usize) -> usize {
        self.tree.borrow().handlers.iter().filter(|(n, _)| *n == node).count()
    }

    /// Fire the click handlers bound to `node`.
    pub fn click(&self, node: usize) {
        let handlers: Vec<Rc<dyn Fn()>> = self
            .tree
            .borrow()
            .handlers
            .iter()
            .filter(|(n, _)| *n == node)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    fn matches(tree: &Tree, node: usize, selector: &str) -> bool {
        let Some(n) = tree.nodes.get(node) else {
            return false;
        };
        if n.answers.iter().any(|a| a == selector) {
            return true;
        }
        if selector.contains([' ', '[']) {
            return false;
        }
        let mut parts = selector.split('.');
        let tag = parts.next().unwrap_or_default();
        (tag.is_empty() || tag == n.tag) && parts.all(|class| n.classes.iter().any(|c| c == class))
    }

    fn is_descendant(tree: &Tree, node: usize, ancestor: usize) -> bool {
        let mut cursor = tree.nodes.get(node).and_then(|n| n.parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = tree.nodes.get(current).and_then(|n| n.parent);
        }
        false
    }

    fn with_node<T>(&self, node: usize, f: impl FnOnce(&mut FakeNode) -> T) -> Result<T, DomError> {
        self.tree.borrow_mut().nodes.get_mut(node).map(f).ok_or(DomError::TargetNotFound)
    }
}

impl PageDom for FakeDom {
    type Node = usize;

    fn has_element_id(&self, id: &str) -> bool {
        self.tree.borrow().style_ids.iter().any(|s| s == id)
    }

    fn append_style(&self, id: &str, _css: &str) -> Result<(), DomError> {
        let mut tree = self.tree.borrow_mut();
        tree.style_ids.push(id.to_owned());
        tree.style_appends += 1;
        Ok(())
    }

    fn query_all(&self, scope: Option<&usize>, selector: &str) -> Vec<usize> {
        let tree = self.tree.borrow();
        (0..tree.nodes.len())
            .filter(|&i| scope.is_none_or(|&s| Self::is_descendant(&tree, i, s)))
            .filter(|&i| Self::matches(&tree, i, selector))
            .collect()
    }

    fn closest(&self, node: &usize, selector: &str) -> Option<usize> {
        let tree = self.tree.borrow();
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if Self::matches(&tree, current, selector) {
                return Some(current);
            }
            cursor = tree.nodes.get(current).and_then(|n| n.parent);
        }
        None
    }

    fn text(&self, node: &usize) -> Option<String> {
        self.tree.borrow().nodes.get(*node).and_then(|n| n.text.clone())
    }

    fn set_class(&self, node: &usize, class: &str, present: bool) -> Result<(), DomError> {
        self.with_node(*node, |n| {
            n.classes.retain(|c| c != class);
            if present {
                n.classes.push(class.to_owned());
            }
        })
    }

    fn append_element(&self, parent: &usize, tag: &str, class: &str) -> Result<usize, DomError> {
        self.with_node(*parent, |_| ())?;
        Ok(self.add(Some(*parent), tag, &[class]))
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) -> Result<(), DomError> {
        self.with_node(*node, |n| {
            n.styles.insert(property.to_owned(), value.to_owned());
        })
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.tree.borrow().root_attributes.get(name).cloned()
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.tree.borrow_mut().root_attributes.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn on_click(&self, node: &usize, handler: Box<dyn Fn()>) -> Result<(), DomError> {
        self.with_node(*node, |_| ())?;
        self.tree.borrow_mut().handlers.push((*node, Rc::from(handler)));
        Ok(())
    }
}
