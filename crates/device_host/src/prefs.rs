//! Console preference contract: JSON values keyed by preference name.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde_json::Value;
use thiserror::Error;

/// Object-safe boxed future used by [`PrefsStore`].
pub type PrefsFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure reported by a preference backend.
pub enum PrefsError {
    /// The backing storage could not be read or written.
    #[error("preference backend unavailable: {0}")]
    Backend(String),
}

/// Host service holding console preferences as decoded JSON values.
///
/// Decoding a value into a typed preference is the caller's job.
pub trait PrefsStore {
    /// Reads the value stored under `key`.
    fn load_value<'a>(&'a self, key: &'a str)
        -> PrefsFuture<'a, Result<Option<Value>, PrefsError>>;

    /// Replaces the value stored under `key`.
    fn store_value<'a>(
        &'a self,
        key: &'a str,
        value: Value,
    ) -> PrefsFuture<'a, Result<(), PrefsError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Preference store that keeps nothing.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_value<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsFuture<'a, Result<Option<Value>, PrefsError>> {
        Box::pin(async { Ok(None) })
    }

    fn store_value<'a>(
        &'a self,
        _key: &'a str,
        _value: Value,
    ) -> PrefsFuture<'a, Result<(), PrefsError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Session-lifetime preference values; clones share the same map.
pub struct MemoryPrefsStore {
    values: Rc<RefCell<BTreeMap<String, Value>>>,
}

impl MemoryPrefsStore {
    /// Returns a store seeded with one value.
    pub fn with_value(key: impl Into<String>, value: Value) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(key.into(), value);
        store
    }

    /// Returns the value currently held under `key`.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_value<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsFuture<'a, Result<Option<Value>, PrefsError>> {
        let value = self.value(key);
        Box::pin(async move { Ok(value) })
    }

    fn store_value<'a>(
        &'a self,
        key: &'a str,
        value: Value,
    ) -> PrefsFuture<'a, Result<(), PrefsError>> {
        self.values.borrow_mut().insert(key.to_owned(), value);
        Box::pin(async { Ok(()) })
    }
}
