//! Ordered element lookup strategies.
//!
//! DESIGN
//! ======
//! Host pages are not ours, so a target element is found by trying several
//! markers in a fixed order. Each marker is a [`LookupStrategy`] value and
//! [`first_match`] runs them, which keeps the fallback order explicit and
//! testable without a DOM.

#[cfg(test)]
#[path = "lookup_test.rs"]
mod lookup_test;

use crate::consts::{SECTION_ITEM_SELECTOR, SECTION_LABEL_SELECTOR, SITE_MESSAGE_LABEL};

/// One way of locating a container element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupStrategy {
    /// An `<img>` with `alt == label` inside `container`; resolves to that container.
    IconAlt { container: &'static str, label: &'static str },
    /// Any element matching `selector` whose trimmed text equals `label`;
    /// resolves to its closest `container`.
    LabelText { selector: &'static str, container: &'static str, label: &'static str },
}

impl LookupStrategy {
    /// Ancestor the matched element resolves to.
    #[must_use]
    pub fn container(&self) -> &'static str {
        match self {
            Self::IconAlt { container, .. } | Self::LabelText { container, .. } => container,
        }
    }

    /// CSS selector for the candidate elements this strategy inspects.
    #[must_use]
    pub fn candidate_selector(&self) -> String {
        match self {
            Self::IconAlt { container, label } => {
                format!(r#"{container} img[alt="{}"]"#, label.replace('"', "\\\""))
            }
            Self::LabelText { selector, .. } => (*selector).to_owned(),
        }
    }

    /// Whether a candidate with the given text content qualifies.
    ///
    /// Icon candidates are already filtered by their selector.
    #[must_use]
    pub fn accepts_text(&self, text: Option<&str>) -> bool {
        match self {
            Self::IconAlt { .. } => true,
            Self::LabelText { label, .. } => text.unwrap_or_default().trim() == *label,
        }
    }
}

/// Strategies for the "Site message" navigation item: icon alt text first,
/// then the visible label.
#[must_use]
pub fn site_message_strategies() -> Vec<LookupStrategy> {
    vec![
        LookupStrategy::IconAlt { container: SECTION_ITEM_SELECTOR, label: SITE_MESSAGE_LABEL },
        LookupStrategy::LabelText {
            selector: SECTION_LABEL_SELECTOR,
            container: SECTION_ITEM_SELECTOR,
            label: SITE_MESSAGE_LABEL,
        },
    ]
}

/// Run `resolve` over `strategies` in order and return the first hit.
pub fn first_match<S, T>(strategies: &[S], resolve: impl FnMut(&S) -> Option<T>) -> Option<T> {
    strategies.iter().find_map(resolve)
}
