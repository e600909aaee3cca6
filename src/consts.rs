//! Shared constants for the site widgets: storage keys, DOM markers, and CSS.

// ── Persisted storage keys ──────────────────────────────────────

/// Identity keys checked in order before asking the auth helper.
pub const IDENTITY_KEYS: [&str; 2] = ["sb_user_id_v1", "currentUserId"];

/// Last known unread flag, `"1"` or `"0"`.
pub const UNREAD_CACHE_KEY: &str = "site_msg_unread";

/// Persisted theme name, `"day"` or `"night"`.
pub const THEME_STORAGE_KEY: &str = "site_theme";

// ── Backend ─────────────────────────────────────────────────────

/// REST collection holding per-user site messages.
pub const USER_MESSAGES_PATH: &str = "/rest/v1/user_messages";

// ── Badge DOM ───────────────────────────────────────────────────

/// Accessible label on the navigation icon and visible text of its label.
pub const SITE_MESSAGE_LABEL: &str = "Site message";

pub const SECTION_ITEM_SELECTOR: &str = ".section-item";
pub const SECTION_LABEL_SELECTOR: &str = ".section-item .section-label";
pub const SECTION_ICON_SELECTOR: &str = ".section-icon";

pub const BADGE_STYLE_ID: &str = "siteMsgBadgeStyle";
pub const BADGE_CLASS: &str = "site-msg-badge";
pub const BADGE_ICON_CLASS: &str = "site-msg-icon";

pub const BADGE_CSS: &str = ".site-msg-badge{position:absolute;top:2px;right:2px;width:8px;height:8px;border-radius:999px;background:#ff3b30;}\
.site-msg-icon{position:relative;}";

// ── Theme DOM ───────────────────────────────────────────────────

/// Attribute on `<html>` that the theme stylesheet keys off.
pub const THEME_ATTRIBUTE: &str = "data-theme";

pub const THEME_STYLE_ID: &str = "site-theme-style";
pub const THEME_OPTION_SELECTOR: &str = "section.option";
pub const THEME_DAY_MARKER_SELECTOR: &str = ".icon-circle.day";
pub const THEME_RADIO_SELECTOR: &str = ".radio";

/// Class present on a radio that is *not* selected.
pub const THEME_UNCHECKED_CLASS: &str = "unchecked";

/// Day mode inverts the dark UI, then re-inverts media so photos keep their colors.
pub const THEME_CSS: &str = r#"
html[data-theme="day"] {
  filter: invert(1) hue-rotate(180deg);
  background: #ffffff;
}
html[data-theme="day"] img,
html[data-theme="day"] video,
html[data-theme="day"] iframe,
html[data-theme="day"] canvas {
  filter: invert(1) hue-rotate(180deg);
}
html[data-theme="day"] .toast,
html[data-theme="day"] .modal,
html[data-theme="day"] .popup {
  filter: none;
}
"#;
