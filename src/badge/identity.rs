//! Current-user identity resolution.
//!
//! Storage is checked first under the legacy keys; only when both are empty
//! is the page's auth helper asked to provision an identity.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use async_trait::async_trait;

use crate::consts::IDENTITY_KEYS;
use crate::error::BadgeError;
use crate::util::storage::KeyValueStore;

/// Something that can provision a user identity on demand.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// A fresh identity, or `None` when the provider cannot supply one.
    async fn provision(&self) -> Option<String>;
}

/// Provider for pages without an auth helper.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAuth;

#[async_trait(?Send)]
impl IdentityProvider for NoAuth {
    async fn provision(&self) -> Option<String> {
        None
    }
}

/// Resolve the current identity from `store`, falling back to `auth`.
///
/// # Errors
///
/// Returns [`BadgeError::Anonymous`] when neither source yields a non-empty id.
pub async fn resolve_identity<S, A>(store: &S, auth: &A) -> Result<String, BadgeError>
where
    S: KeyValueStore + ?Sized,
    A: IdentityProvider + ?Sized,
{
    if let Some(id) = store.first_present(&IDENTITY_KEYS) {
        return Ok(id);
    }
    auth.provision()
        .await
        .filter(|id| !id.is_empty())
        .ok_or(BadgeError::Anonymous)
}

/// Wraps the page's `window.ExaAuth.ensureSupabaseUserId()`, which may
/// return a plain value or a promise. Looked up at call time.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsAuthProvider;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl IdentityProvider for JsAuthProvider {
    async fn provision(&self) -> Option<String> {
        use wasm_bindgen::JsCast;

        use crate::util::{js, scalar};

        let window = web_sys::window()?;
        let helper = js::property(&window, "ExaAuth")?;
        let ensure = js::property(&helper, "ensureSupabaseUserId")?;
        let ensure = ensure.dyn_ref::<js_sys::Function>()?;
        let returned = match ensure.call0(&helper) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("auth helper threw: {}", js::describe(&err));
                return None;
            }
        };
        let promise = js_sys::Promise::resolve(&returned);
        match wasm_bindgen_futures::JsFuture::from(promise).await {
            Ok(value) => scalar::from_js(&value).into_identity(),
            Err(err) => {
                log::debug!("auth helper rejected: {}", js::describe(&err));
                None
            }
        }
    }
}
