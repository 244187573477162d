//! Persisted key-value entries, the application's equivalent of the browser's
//! local storage.
//!
//! One entry holds the wizard state under a fixed application key, one entry
//! per authenticated donor holds the local donation history, and one entry
//! holds the session token. Entries are plain strings (JSON documents in
//! practice, see [`read_json`]/[`write_json`]); ownership of an entry is not
//! coordinated between concurrent writers, the last write wins.

use {serde::Serialize, serde::de::DeserializeOwned, thiserror::Error};

mod file_store;
mod memory;

pub use {file_store::FileStore, memory::MemoryStore};

/// Key of the single wizard-state entry. Shared by all sessions on purpose.
pub const DONATION_STATE_KEY: &str = "donation-state";
/// Key of the session-token entry.
pub const SESSION_TOKEN_KEY: &str = "session-token";

/// Key of a donor's local donation history entry.
pub fn history_key(donor_id: &str) -> String {
    format!("donation-history.{donor_id}")
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed entry: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid entry key {0:?}")]
    InvalidKey(String),
}

/// Synchronous persisted entry storage.
///
/// Writes are expected to be atomic per entry: readers observe either the
/// previous or the new value, never a torn one.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait EntryStoring: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and deserializes the entry under `key`, if present.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn EntryStoring,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.read(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializes `value` and writes it under `key`.
pub fn write_json<T: Serialize>(
    store: &dyn EntryStoring,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.write(key, &raw)
}
