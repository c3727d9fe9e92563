//! Persistence layer: best-effort save/restore of history and groups.
//!
//! DESIGN
//! ======
//! Two independently keyed JSON records live in a client-local key/value
//! store: the `{past, present, future}` history and the flat group list.
//! Loading never fails; an absent or malformed record yields the empty
//! default. Saving never fails the caller either; the in-memory state stays
//! authoritative for the session.
//!
//! CAPACITY
//! ========
//! If the encoded history exceeds `max_persist_bytes`, or the store rejects
//! the write for quota, the history is rewritten as `{past: [], present,
//! future: []}`. If that also fails the error is logged and dropped.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::config::BoardConfig;
use crate::doc::Group;
use crate::groups::GroupRegistry;
use crate::history::{History, HistoryRecord};

// =============================================================================
// TYPES
// =============================================================================

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failure writing one record.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a history save fell back to the present board only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// The encoded history was larger than the configured threshold.
    TooLarge,
    /// The store refused the full record for lack of space.
    QuotaExceeded,
}

/// Result of a best-effort save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The whole record was written.
    Full,
    /// Only the present board was written; undo/redo depth was dropped.
    Degraded(DegradeReason),
    /// Nothing was written.
    Failed,
}

impl SaveOutcome {
    /// Message for a non-blocking capacity warning, if this outcome warrants one.
    #[must_use]
    pub fn warning(self) -> Option<&'static str> {
        match self {
            Self::Full => None,
            Self::Degraded(DegradeReason::TooLarge) => {
                Some("Board history is too large to store; only the current board was saved.")
            }
            Self::Degraded(DegradeReason::QuotaExceeded) => {
                Some("Browser storage is full; only the current board was saved.")
            }
            Self::Failed => Some("Board could not be saved; changes will be lost on reload."),
        }
    }
}

// =============================================================================
// STORAGE BACKENDS
// =============================================================================

/// Synchronous string key/value store.
pub trait Storage {
    /// Read the record under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] when the store is full.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store with an optional total size quota (keys plus values, in bytes).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes pushing its total size past `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { items: HashMap::new(), quota: Some(bytes) }
    }

    /// Total bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let replaced = self.items.get(key).map_or(0, |v| key.len() + v.len());
            let after = self.used_bytes() - replaced + key.len() + value.len();
            if after > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(feature = "web")]
pub use web::LocalStorage;

#[cfg(feature = "web")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};

    use super::{Storage, StorageError};

    /// Browser `window.localStorage`.
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        /// Open the window's local storage.
        ///
        /// # Errors
        ///
        /// Returns [`StorageError::Backend`] when there is no window or storage is disabled.
        pub fn open() -> Result<Self, StorageError> {
            let window = web_sys::window().ok_or_else(|| StorageError::Backend("no window".into()))?;
            let storage = window
                .local_storage()
                .map_err(js_err)?
                .ok_or_else(|| StorageError::Backend("localStorage unavailable".into()))?;
            Ok(Self { storage })
        }
    }

    fn js_err(err: JsValue) -> StorageError {
        match err.dyn_ref::<web_sys::DomException>() {
            Some(dom) if dom.name() == "QuotaExceededError" => StorageError::QuotaExceeded,
            Some(dom) => StorageError::Backend(dom.message()),
            None => StorageError::Backend(format!("{err:?}")),
        }
    }

    impl Storage for LocalStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage.get_item(key).map_err(js_err)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage.set_item(key, value).map_err(js_err)
        }
    }
}

// =============================================================================
// SAVE
// =============================================================================

fn write_record<S, T>(storage: &mut S, key: &str, value: &T) -> Result<(), PersistError>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    storage.set_item(key, &encoded)?;
    Ok(())
}

/// Save `history`, degrading to present-only when it is too large or the store is full.
pub fn save_history<S>(storage: &mut S, history: &History, config: &BoardConfig) -> SaveOutcome
where
    S: Storage + ?Sized,
{
    let encoded = match serde_json::to_string(&history.record()) {
        Ok(encoded) => encoded,
        Err(e) => {
            error!(error = %e, "failed to encode history");
            return SaveOutcome::Failed;
        }
    };

    if encoded.len() > config.max_persist_bytes {
        warn!(
            bytes = encoded.len(),
            limit = config.max_persist_bytes,
            "history too large, saving only current state"
        );
        return save_present_only(storage, history, config, DegradeReason::TooLarge);
    }

    match storage.set_item(&config.history_key, &encoded) {
        Ok(()) => {
            debug!(bytes = encoded.len(), "history saved");
            SaveOutcome::Full
        }
        Err(StorageError::QuotaExceeded) => {
            warn!("storage full, saving only current state");
            save_present_only(storage, history, config, DegradeReason::QuotaExceeded)
        }
        Err(e) => {
            error!(error = %e, "failed to save history");
            SaveOutcome::Failed
        }
    }
}

fn save_present_only<S>(storage: &mut S, history: &History, config: &BoardConfig, reason: DegradeReason) -> SaveOutcome
where
    S: Storage + ?Sized,
{
    let slim = history.present_only();
    match write_record(storage, &config.history_key, &slim.record()) {
        Ok(()) => SaveOutcome::Degraded(reason),
        Err(e) => {
            error!(error = %e, "failed to save even minimal history");
            SaveOutcome::Failed
        }
    }
}

/// Save the group registry as a flat `[{id, name}]` array.
pub fn save_groups<S>(storage: &mut S, groups: &GroupRegistry, config: &BoardConfig) -> SaveOutcome
where
    S: Storage + ?Sized,
{
    match write_record(storage, &config.groups_key, groups.groups()) {
        Ok(()) => SaveOutcome::Full,
        Err(e) => {
            error!(error = %e, "failed to save groups");
            SaveOutcome::Failed
        }
    }
}

// =============================================================================
// LOAD
// =============================================================================

fn read_raw<S>(storage: &S, key: &str) -> Option<String>
where
    S: Storage + ?Sized,
{
    match storage.get_item(key) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "failed to read record");
            None
        }
    }
}

/// Load the history record, or an empty history when absent or malformed.
pub fn load_history<S>(storage: &S, config: &BoardConfig) -> History
where
    S: Storage + ?Sized,
{
    let Some(raw) = read_raw(storage, &config.history_key) else {
        return History::with_limit(config.history_limit);
    };
    match serde_json::from_str::<HistoryRecord>(&raw) {
        Ok(record) => History::from_record(record, config.history_limit),
        Err(e) => {
            warn!(error = %e, "failed to load history, starting empty");
            History::with_limit(config.history_limit)
        }
    }
}

/// Load the group registry, or an empty registry when absent or malformed.
pub fn load_groups<S>(storage: &S, config: &BoardConfig) -> GroupRegistry
where
    S: Storage + ?Sized,
{
    let Some(raw) = read_raw(storage, &config.groups_key) else {
        return GroupRegistry::new();
    };
    match serde_json::from_str::<Vec<Group>>(&raw) {
        Ok(groups) => GroupRegistry::from_groups(groups),
        Err(e) => {
            warn!(error = %e, "failed to load groups, starting empty");
            GroupRegistry::new()
        }
    }
}
