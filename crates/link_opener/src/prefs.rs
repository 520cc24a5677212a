//! Link-opener behavior preferences backed by the host prefs store.

use device_host::{PrefsError, PrefsStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Prefs key holding [`LinkOpenerPrefs`].
pub const LINK_OPENER_PREFS_KEY: &str = "device_console.link_opener.prefs.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Operator-tunable behavior of the link-opener inputs.
///
/// The browser selection itself is never persisted here.
pub struct LinkOpenerPrefs {
    /// Pressing Enter in the URL input opens the link.
    pub submit_on_enter: bool,
    /// Changing the browser returns focus to the URL input.
    pub focus_input_after_selection: bool,
}

impl Default for LinkOpenerPrefs {
    fn default() -> Self {
        Self {
            submit_on_enter: true,
            focus_input_after_selection: true,
        }
    }
}

#[derive(Debug, Error)]
/// Failure to persist [`LinkOpenerPrefs`].
pub enum LinkOpenerPrefsError {
    #[error("link opener prefs could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] PrefsError),
}

/// Loads link-opener prefs, falling back to defaults when nothing usable is stored.
pub async fn load_link_opener_prefs(store: &dyn PrefsStore) -> LinkOpenerPrefs {
    let value = match store.load_value(LINK_OPENER_PREFS_KEY).await {
        Ok(Some(value)) => value,
        Ok(None) => return LinkOpenerPrefs::default(),
        Err(err) => {
            warn!(error = %err, "link opener prefs load failed; using defaults");
            return LinkOpenerPrefs::default();
        }
    };
    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!(error = %err, "stored link opener prefs are malformed; using defaults");
        LinkOpenerPrefs::default()
    })
}

/// Persists link-opener prefs.
///
/// # Errors
///
/// Returns [`LinkOpenerPrefsError`] when encoding or the store write fails.
pub async fn save_link_opener_prefs(
    store: &dyn PrefsStore,
    prefs: &LinkOpenerPrefs,
) -> Result<(), LinkOpenerPrefsError> {
    let value = serde_json::to_value(prefs)?;
    store.store_value(LINK_OPENER_PREFS_KEY, value).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use device_host::{MemoryPrefsStore, NoopPrefsStore, PrefsFuture};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    struct OfflinePrefsStore;

    impl PrefsStore for OfflinePrefsStore {
        fn load_value<'a>(
            &'a self,
            _key: &'a str,
        ) -> PrefsFuture<'a, Result<Option<Value>, PrefsError>> {
            Box::pin(async { Err(PrefsError::Backend("offline".to_string())) })
        }

        fn store_value<'a>(
            &'a self,
            _key: &'a str,
            _value: Value,
        ) -> PrefsFuture<'a, Result<(), PrefsError>> {
            Box::pin(async { Err(PrefsError::Backend("offline".to_string())) })
        }
    }

    #[test]
    fn missing_prefs_use_defaults() {
        assert_eq!(
            block_on(load_link_opener_prefs(&NoopPrefsStore)),
            LinkOpenerPrefs::default()
        );
    }

    #[test]
    fn saved_prefs_load_back() {
        let store = MemoryPrefsStore::default();
        let prefs = LinkOpenerPrefs {
            submit_on_enter: false,
            focus_input_after_selection: true,
        };
        block_on(save_link_opener_prefs(&store, &prefs)).expect("save prefs");
        assert_eq!(block_on(load_link_opener_prefs(&store)), prefs);
    }

    #[test]
    fn partial_prefs_fill_missing_fields() {
        let store = MemoryPrefsStore::with_value(
            LINK_OPENER_PREFS_KEY,
            json!({ "focus_input_after_selection": false }),
        );

        let prefs = block_on(load_link_opener_prefs(&store));
        assert!(prefs.submit_on_enter);
        assert!(!prefs.focus_input_after_selection);
    }

    #[test]
    fn malformed_prefs_fall_back_to_defaults() {
        let store = MemoryPrefsStore::with_value(LINK_OPENER_PREFS_KEY, json!("not prefs"));
        assert_eq!(
            block_on(load_link_opener_prefs(&store)),
            LinkOpenerPrefs::default()
        );
    }

    #[test]
    fn backend_failures_fall_back_on_load_and_surface_on_save() {
        assert_eq!(
            block_on(load_link_opener_prefs(&OfflinePrefsStore)),
            LinkOpenerPrefs::default()
        );

        let err = block_on(save_link_opener_prefs(
            &OfflinePrefsStore,
            &LinkOpenerPrefs::default(),
        ))
        .expect_err("offline store");
        assert!(matches!(
            err,
            LinkOpenerPrefsError::Store(PrefsError::Backend(reason)) if reason == "offline"
        ));
    }
}
