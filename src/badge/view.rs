//! Badge rendering onto the navigation item.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::rc::Rc;

use crate::consts::{BADGE_CLASS, BADGE_CSS, BADGE_ICON_CLASS, BADGE_STYLE_ID, SECTION_ICON_SELECTOR};
use crate::error::DomError;
use crate::util::dom::{PageDom, find_container, inject_style_once};
use crate::util::lookup::{LookupStrategy, site_message_strategies};

/// Shows or hides the unread dot.
pub trait BadgeView {
    /// # Errors
    ///
    /// Returns [`DomError`] when the target is missing or cannot be mutated.
    fn set_visible(&self, visible: bool) -> Result<(), DomError>;
}

impl<V: BadgeView + ?Sized> BadgeView for &V {
    fn set_visible(&self, visible: bool) -> Result<(), DomError> {
        (**self).set_visible(visible)
    }
}

impl<V: BadgeView + ?Sized> BadgeView for Rc<V> {
    fn set_visible(&self, visible: bool) -> Result<(), DomError> {
        (**self).set_visible(visible)
    }
}

/// Renders the dot into a page.
///
/// The stylesheet goes in first so a later-rendered nav item still picks it
/// up. The item is located with [`LookupStrategy`] values in order; within
/// it, the dot hangs off `.section-icon` (or the item itself) and is reused
/// across calls.
#[derive(Debug, Clone)]
pub struct DomBadgeView<D> {
    dom: D,
    strategies: Vec<LookupStrategy>,
}

impl<D: PageDom> DomBadgeView<D> {
    /// View over the "Site message" navigation item.
    #[must_use]
    pub fn new(dom: D) -> Self {
        Self { dom, strategies: site_message_strategies() }
    }
}

impl<D: PageDom> BadgeView for DomBadgeView<D> {
    fn set_visible(&self, visible: bool) -> Result<(), DomError> {
        let dom = &self.dom;
        inject_style_once(dom, BADGE_STYLE_ID, BADGE_CSS)?;
        let item = find_container(dom, &self.strategies).ok_or(DomError::TargetNotFound)?;
        let icon = dom.query_one(&item, SECTION_ICON_SELECTOR).unwrap_or(item);
        dom.set_class(&icon, BADGE_ICON_CLASS, true)?;

        let badge = match dom.query_one(&icon, &format!(".{BADGE_CLASS}")) {
            Some(existing) => existing,
            None => dom.append_element(&icon, "span", BADGE_CLASS)?,
        };
        dom.set_style(&badge, "display", if visible { "block" } else { "none" })
    }
}

/// The badge view over the live document.
#[cfg(feature = "hydrate")]
pub type DocumentBadgeView = DomBadgeView<crate::util::js::WebDom>;
