//! Persisted key-value storage behind a small trait.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both widgets keep string flags in `localStorage`. The trait lets widget
//! logic run against [`MemoryStore`] off-browser while the hydrate build
//! talks to the real store through [`LocalStorage`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;

/// String-valued persisted storage.
pub trait KeyValueStore {
    /// Read `key`. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be reached.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the store cannot be reached or rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// First non-empty value among `keys`, in order. Read failures count as absent.
    fn first_present(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.get(key) {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(err) => {
                log::debug!("storage read {key} failed: {err}");
                None
            }
        })
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Page-lifetime store for hosts without `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `pairs`.
    #[must_use]
    pub fn with_entries<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
        Self { entries: RefCell::new(entries) }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The browser's `window.localStorage`, looked up on every call.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable),
            Err(err) => Err(StorageError::Access(super::js::describe(&err))),
        }
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Access(super::js::describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Access(super::js::describe(&err)))
    }
}
