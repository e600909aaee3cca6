//! Unread-message badge on the "Site message" navigation item.
//!
//! SYSTEM CONTEXT
//! ==============
//! On page-ready the badge paints the last cached state immediately, then
//! resolves the identity, asks the backend whether an unread message exists,
//! corrects the paint, and caches the answer for the next page load.
//!
//! ERROR HANDLING
//! ==============
//! [`BadgeIndicator::refresh`] reports why a refresh degraded;
//! [`BadgeIndicator::run`] swallows it after logging. Every degraded path
//! ends with the badge hidden (or untouched when the DOM target is missing).

#[cfg(test)]
#[path = "badge_test.rs"]
mod badge_test;

pub mod identity;
pub mod view;

use crate::consts::UNREAD_CACHE_KEY;
use crate::error::{BadgeError, StorageError};
use crate::net::unread::UnreadSource;
use crate::util::storage::KeyValueStore;

use self::identity::{IdentityProvider, resolve_identity};
use self::view::BadgeView;

/// Decode the cached unread flag. Anything but `"1"`/`"0"` is ignored.
#[must_use]
pub fn decode_cached_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

#[must_use]
pub fn encode_cached_flag(unread: bool) -> &'static str {
    if unread { "1" } else { "0" }
}

/// The badge widget, generic over each of its boundaries.
pub struct BadgeIndicator<S, A, Q, V> {
    store: S,
    auth: A,
    source: Q,
    view: V,
}

impl<S, A, Q, V> BadgeIndicator<S, A, Q, V>
where
    S: KeyValueStore,
    A: IdentityProvider,
    Q: UnreadSource,
    V: BadgeView,
{
    #[must_use]
    pub fn new(store: S, auth: A, source: Q, view: V) -> Self {
        Self { store, auth, source, view }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn view(&self) -> &V {
        &self.view
    }

    /// Paint the cached flag from the previous page load, if any.
    ///
    /// Returns the painted state, or `None` when nothing usable was cached.
    ///
    /// # Errors
    ///
    /// Returns [`BadgeError`] when the cache cannot be read or the paint fails.
    pub fn paint_cached(&self) -> Result<Option<bool>, BadgeError> {
        let cached = self.store.get(UNREAD_CACHE_KEY)?.as_deref().and_then(decode_cached_flag);
        if let Some(visible) = cached {
            self.view.set_visible(visible)?;
        }
        Ok(cached)
    }

    /// Resolve the live unread state, render it, and cache it.
    ///
    /// Anonymous users get a hidden badge and no cache write. A failed query
    /// renders and caches "no unread" before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`BadgeError`] hit along the way.
    pub async fn refresh(&self) -> Result<bool, BadgeError> {
        let user_id = match resolve_identity(&self.store, &self.auth).await {
            Ok(id) => id,
            Err(err) => {
                self.hide();
                return Err(err);
            }
        };

        let (unread, query_err) = match self.source.has_unread(&user_id).await {
            Ok(unread) => (unread, None),
            Err(err) => (false, Some(err)),
        };
        let rendered = self.view.set_visible(unread);
        let persisted = self.persist(unread);

        if let Some(err) = query_err {
            return Err(err.into());
        }
        rendered?;
        persisted?;
        Ok(unread)
    }

    /// Cached paint followed by a live refresh. Never fails.
    pub async fn run(&self) {
        match self.paint_cached() {
            Ok(Some(visible)) => log::debug!("badge: painted cached state visible={visible}"),
            Ok(None) => {}
            Err(err) => log::debug!("badge: cached paint skipped: {err}"),
        }
        match self.refresh().await {
            Ok(unread) => log::debug!("badge: unread={unread}"),
            Err(err) => log::debug!("badge: degraded to hidden: {err}"),
        }
    }

    fn hide(&self) {
        if let Err(err) = self.view.set_visible(false) {
            log::debug!("badge: hide failed: {err}");
        }
    }

    fn persist(&self, unread: bool) -> Result<(), StorageError> {
        self.store.set(UNREAD_CACHE_KEY, encode_cached_flag(unread))
    }
}
