//! Browser entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once when the wasm module loads: installs logging and the theme
//! globals, reads the page's backend config, and starts both widgets when
//! the document is ready. The widgets share nothing.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::badge::BadgeIndicator;
use crate::badge::identity::JsAuthProvider;
use crate::badge::view::{DocumentBadgeView, DomBadgeView};
use crate::config::{self, BackendConfig, Headers};
use crate::net::transport::GlooTransport;
use crate::net::unread::RestUnreadSource;
use crate::theme::ThemeSwitcher;
use crate::theme::view::{DocumentThemeView, DomThemeView, bind_selector_clicks};
use crate::util::js::{self, WebDom};
use crate::util::scalar::{self, Scalar};
use crate::util::storage::LocalStorage;

type PageBadge = BadgeIndicator<LocalStorage, JsAuthProvider, RestUnreadSource<GlooTransport>, DocumentBadgeView>;
type PageTheme = ThemeSwitcher<LocalStorage, DocumentThemeView>;

/// Page config object consumed by the badge.
const BACKEND_CONFIG_GLOBAL: &str = "SB_CONFIG";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("logger already installed");
    }

    let theme: Rc<PageTheme> = Rc::new(ThemeSwitcher::new(LocalStorage, DomThemeView::new(WebDom)));
    install_theme_globals(&theme);
    when_ready(move || {
        let active = theme.init();
        let bound = bind_selector_clicks(Rc::clone(&theme));
        log::debug!("theme: {active} active, {bound} selector options bound");
    });

    when_ready(|| {
        let source = RestUnreadSource::new(page_backend_config(), GlooTransport);
        let badge: PageBadge = BadgeIndicator::new(LocalStorage, JsAuthProvider, source, DomBadgeView::new(WebDom));
        wasm_bindgen_futures::spawn_local(async move {
            badge.run().await;
        });
    });
}

/// Run `f` now if the DOM is parsed, otherwise on `DOMContentLoaded`.
fn when_ready<F: FnOnce() + 'static>(f: F) {
    let doc = match js::document() {
        Ok(doc) => doc,
        Err(err) => {
            log::debug!("startup skipped: {err}");
            return;
        }
    };
    if doc.ready_state() != "loading" {
        f();
        return;
    }
    let callback: Closure<dyn FnMut()> = Closure::once(f);
    if let Err(err) = doc.add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref()) {
        log::debug!("DOMContentLoaded binding failed: {}", js::describe(&err));
    }
    callback.forget();
}

/// `window.setSiteTheme(name)` and `window.getSiteTheme()` for other page scripts.
fn install_theme_globals(theme: &Rc<PageTheme>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let for_setter = Rc::clone(theme);
    let setter = Closure::<dyn Fn(JsValue)>::new(move |name: JsValue| {
        for_setter.apply_named(&name.as_string().unwrap_or_default());
    });
    let for_getter = Rc::clone(theme);
    let getter = Closure::<dyn Fn() -> String>::new(move || for_getter.current_name());

    for (name, function) in [("setSiteTheme", setter.as_ref()), ("getSiteTheme", getter.as_ref())] {
        if let Err(err) = js_sys::Reflect::set(&window, &JsValue::from_str(name), function) {
            log::debug!("installing {name} failed: {}", js::describe(&err));
        }
    }
    setter.forget();
    getter.forget();
}

/// Convert `window.SB_CONFIG` into a [`BackendConfig`].
///
/// Plain fields go through JSON; a `headers` function survives as a builder
/// called with the config object as `this`.
fn page_backend_config() -> Option<BackendConfig> {
    let window = web_sys::window()?;
    let raw = js::property(&window, BACKEND_CONFIG_GLOBAL)?;
    let json = match js_sys::JSON::stringify(&raw) {
        Ok(json) => String::from(json),
        Err(err) => {
            log::debug!("{BACKEND_CONFIG_GLOBAL} is not serialisable: {}", js::describe(&err));
            return None;
        }
    };
    let config = match BackendConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::debug!("{BACKEND_CONFIG_GLOBAL} is not an object: {err}");
            return None;
        }
    };

    let Some(build) = js::property(&raw, "headers").filter(JsValue::is_function) else {
        return Some(config);
    };
    let build: js_sys::Function = build.unchecked_into();
    Some(config.with_header_builder(Rc::new(move || headers_from_js(&build, &raw))))
}

/// Call the page's header builder. Accepts a plain object, a `Headers`
/// instance, or any iterable of `[name, value]` pairs; values are stringified.
fn headers_from_js(build: &js_sys::Function, this: &JsValue) -> Option<Headers> {
    let value = match build.call0(this) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("header builder threw: {}", js::describe(&err));
            return None;
        }
    };
    if !value.is_object() {
        return None;
    }
    let pairs: Vec<JsValue> = match js_sys::try_iter(&value) {
        Ok(Some(iter)) => iter
            .filter_map(|item| match item {
                Ok(pair) => Some(pair),
                Err(err) => {
                    log::debug!("header iteration failed: {}", js::describe(&err));
                    None
                }
            })
            .collect(),
        Ok(None) => js_sys::Object::entries(value.unchecked_ref::<js_sys::Object>()).to_vec(),
        Err(err) => {
            log::debug!("header builder result unreadable: {}", js::describe(&err));
            return None;
        }
    };
    Some(config::header_pairs(pairs.iter().map(header_pair)))
}

fn header_pair(pair: &JsValue) -> (Scalar, Scalar) {
    let Some(pair) = pair.dyn_ref::<js_sys::Array>() else {
        return (Scalar::Nullish, Scalar::Nullish);
    };
    (scalar::from_js(&pair.get(0)), scalar::from_js(&pair.get(1)))
}
