//! Theme rendering: stylesheet, root attribute, and selector controls.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::rc::Rc;

use super::{Theme, ThemeSwitcher, radio_unchecked};
use crate::consts::{
    THEME_ATTRIBUTE, THEME_CSS, THEME_DAY_MARKER_SELECTOR, THEME_OPTION_SELECTOR, THEME_RADIO_SELECTOR,
    THEME_STYLE_ID, THEME_UNCHECKED_CLASS,
};
use crate::error::DomError;
use crate::util::dom::{PageDom, inject_style_once};
use crate::util::storage::KeyValueStore;

/// DOM side of the theme switcher.
pub trait ThemeView {
    /// Inject the theme stylesheet unless already present.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] when there is nowhere to put it.
    fn ensure_style(&self) -> Result<(), DomError>;

    /// Set the root theme attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] when the root element is missing.
    fn set_root_theme(&self, theme: Theme) -> Result<(), DomError>;

    /// Raw root theme attribute, if set.
    fn root_theme(&self) -> Option<String>;

    /// Mark the selector option for `active` as checked and the rest unchecked.
    /// Pages without selectors are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] when a radio's class list cannot be updated.
    fn sync_selectors(&self, active: Theme) -> Result<(), DomError>;
}

impl<V: ThemeView + ?Sized> ThemeView for Rc<V> {
    fn ensure_style(&self) -> Result<(), DomError> {
        (**self).ensure_style()
    }

    fn set_root_theme(&self, theme: Theme) -> Result<(), DomError> {
        (**self).set_root_theme(theme)
    }

    fn root_theme(&self) -> Option<String> {
        (**self).root_theme()
    }

    fn sync_selectors(&self, active: Theme) -> Result<(), DomError> {
        (**self).sync_selectors(active)
    }
}

/// Renders the theme into a page.
#[derive(Debug, Default, Clone)]
pub struct DomThemeView<D> {
    dom: D,
}

impl<D: PageDom> DomThemeView<D> {
    #[must_use]
    pub fn new(dom: D) -> Self {
        Self { dom }
    }

    /// `section.option` elements currently on the page.
    fn options(&self) -> Vec<D::Node> {
        self.dom.query_all(None, THEME_OPTION_SELECTOR)
    }

    /// Theme an option element stands for.
    fn option_theme(&self, option: &D::Node) -> Theme {
        Theme::for_option(self.dom.query_one(option, THEME_DAY_MARKER_SELECTOR).is_some())
    }
}

impl<D: PageDom> ThemeView for DomThemeView<D> {
    fn ensure_style(&self) -> Result<(), DomError> {
        inject_style_once(&self.dom, THEME_STYLE_ID, THEME_CSS)
    }

    fn set_root_theme(&self, theme: Theme) -> Result<(), DomError> {
        self.dom.set_root_attribute(THEME_ATTRIBUTE, theme.as_str())
    }

    fn root_theme(&self) -> Option<String> {
        self.dom.root_attribute(THEME_ATTRIBUTE)
    }

    fn sync_selectors(&self, active: Theme) -> Result<(), DomError> {
        for option in self.options() {
            let Some(radio) = self.dom.query_one(&option, THEME_RADIO_SELECTOR) else {
                continue;
            };
            let unchecked = radio_unchecked(self.option_theme(&option), active);
            self.dom.set_class(&radio, THEME_UNCHECKED_CLASS, unchecked)?;
        }
        Ok(())
    }
}

/// Make every selector option clickable. Returns how many were bound.
///
/// The option's theme is read at click time, so markup changed after
/// binding is honoured.
pub fn bind_selector_clicks<S, D>(switcher: Rc<ThemeSwitcher<S, DomThemeView<D>>>) -> usize
where
    S: KeyValueStore + 'static,
    D: PageDom + 'static,
{
    let view = switcher.view();
    let options = view.options();
    for option in &options {
        if let Err(err) = view.dom.set_style(option, "cursor", "pointer") {
            log::debug!("theme: cursor style failed: {err}");
        }
        let switcher_for_click = Rc::clone(&switcher);
        let target = option.clone();
        let on_click = Box::new(move || {
            let theme = switcher_for_click.view().option_theme(&target);
            switcher_for_click.apply(theme);
        });
        if let Err(err) = view.dom.on_click(option, on_click) {
            log::debug!("theme: click binding failed: {err}");
        }
    }
    options.len()
}

/// The theme view over the live document.
#[cfg(feature = "hydrate")]
pub type DocumentThemeView = DomThemeView<crate::util::js::WebDom>;
