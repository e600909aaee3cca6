//! Day/night theme switcher.
//!
//! Reads the user's preference from persisted storage and applies a
//! `data-theme` attribute to the `<html>` element. The injected stylesheet
//! keys off that attribute: night is the page as authored, day inverts it.
//! Apply writes back to storage and syncs any selector controls on the page.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort; every failing step is logged and
//! skipped so the remaining steps still run and the theme is always valid.


pub mod view;

use std::fmt;

use crate::consts::THEME_STORAGE_KEY;
use crate::util::storage::KeyValueStore;

use self::view::ThemeView;

/// Global page color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    /// Inverted, light rendering of the dark UI.
    Day,
    #[default]
    Night,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }

    /// Exact, case-sensitive parse.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "day" => Some(Self::Day),
            "night" => Some(Self::Night),
            _ => None,
        }
    }

    /// Parse `raw`, falling back to the default (night).
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    /// Theme a selector option stands for: day when it carries the day marker.
    #[must_use]
    pub fn for_option(has_day_marker: bool) -> Self {
        if has_day_marker { Self::Day } else { Self::Night }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a selector option's radio should carry the `unchecked` class.
#[must_use]
pub fn radio_unchecked(option: Theme, active: Theme) -> bool {
    option != active
}

/// Owns the theme preference for one page.
pub struct ThemeSwitcher<S, V> {
    store: S,
    view: V,
}

impl<S: KeyValueStore, V: ThemeView> ThemeSwitcher<S, V> {
    #[must_use]
    pub fn new(store: S, view: V) -> Self {
        Self { store, view }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn view(&self) -> &V {
        &self.view
    }

    /// Stored preference, or `None` when absent, invalid, or unreadable.
    #[must_use]
    pub fn load_preference(&self) -> Option<Theme> {
        match self.store.get(THEME_STORAGE_KEY) {
            Ok(raw) => raw.as_deref().and_then(Theme::parse),
            Err(err) => {
                log::debug!("theme: preference read failed: {err}");
                None
            }
        }
    }

    /// Apply the stored preference (or night). Run once on page-ready.
    pub fn init(&self) -> Theme {
        self.apply(self.load_preference().unwrap_or_default())
    }

    /// Apply `theme`: stylesheet, root attribute, persisted value, selectors.
    pub fn apply(&self, theme: Theme) -> Theme {
        if let Err(err) = self.view.ensure_style() {
            log::debug!("theme: stylesheet injection failed: {err}");
        }
        if let Err(err) = self.view.set_root_theme(theme) {
            log::debug!("theme: root attribute failed: {err}");
        }
        if let Err(err) = self.store.set(THEME_STORAGE_KEY, theme.as_str()) {
            log::debug!("theme: preference write failed: {err}");
        }
        if let Err(err) = self.view.sync_selectors(theme) {
            log::debug!("theme: selector sync failed: {err}");
        }
        theme
    }

    /// Apply a theme by name; unknown names resolve to night.
    pub fn apply_named(&self, name: &str) -> Theme {
        self.apply(Theme::resolve(Some(name)))
    }

    /// Active theme as shown on the root element, night when unset or foreign.
    #[must_use]
    pub fn current(&self) -> Theme {
        Theme::resolve(self.view.root_theme().as_deref())
    }

    /// Root attribute exactly as other page scripts see it; night only when
    /// the attribute is missing or empty. Backs `window.getSiteTheme`.
    #[must_use]
    pub fn current_name(&self) -> String {
        self.view
            .root_theme()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| Theme::default().as_str().to_owned())
    }
}
