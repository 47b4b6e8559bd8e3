//! Persistent Key-Value Store
//!
//! Everything that has to survive a page reload goes through a
//! [`KeyValueStore`]. Backends only move strings; the typed layer on top
//! handles JSON so callers read and write plain Rust values.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ArdenError, Result};

/// Well-known storage keys
pub mod keys {
    /// Ordered list of joined campaign ids
    pub const JOINED_CAMPAIGNS: &str = "joinedCampaigns";

    /// Campaigns created in this browser
    pub const CREATED_CAMPAIGNS: &str = "createdCampaigns";

    /// Whether the navbar shows the wallet as connected
    pub const WALLET_CONNECTED: &str = "walletConnected";

    /// Display name from the register form
    pub const USER_NAME: &str = "userName";

    /// Full register form submission
    pub const USER_DATA: &str = "userData";
}

/// Whether the register form was completed in this browser
pub fn has_local_profile<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    [keys::USER_NAME, keys::USER_DATA]
        .iter()
        .any(|key| matches!(store.get_raw(key), Ok(Some(_))))
}

/// Raw string store (browser `localStorage`, memory, ...)
pub trait KeyValueStore: Send + Sync {
    /// Raw value for a key, `None` when absent
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under a key
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Forget a key
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed JSON access on top of any [`KeyValueStore`]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Value under `key`, or `default` when the key is absent or unreadable
    fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "Store read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value is not valid JSON, using default");
                default
            }
        }
    }

    /// Serialize `value` and store it under `key` (last write wins)
    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        tracing::debug!(key, bytes = raw.len(), "Store write");
        self.set_raw(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// In-memory store (for native use and tests)
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ArdenError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ArdenError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ArdenError::Storage("memory store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_yields_default() {
        let store = MemoryStore::new();
        let joined: Vec<String> = store.read(keys::JOINED_CAMPAIGNS, vec!["x".into()]);
        assert_eq!(joined, vec!["x".to_string()]);
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        store.write(keys::WALLET_CONNECTED, &true).unwrap();
        assert!(store.read(keys::WALLET_CONNECTED, false));

        store.write(keys::WALLET_CONNECTED, &false).unwrap();
        assert!(!store.read(keys::WALLET_CONNECTED, true));
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let store = MemoryStore::new();
        store.set_raw(keys::CREATED_CAMPAIGNS, "{not json").unwrap();
        let created: Vec<u32> = store.read(keys::CREATED_CAMPAIGNS, Vec::new());
        assert!(created.is_empty());
    }

    #[test]
    fn test_local_profile() {
        let store = MemoryStore::new();
        assert!(!has_local_profile(&store));

        store.write(keys::USER_DATA, &serde_json::json!({ "name": "Ada" })).unwrap();
        assert!(has_local_profile(&store));

        store.remove(keys::USER_DATA).unwrap();
        store.write(keys::USER_NAME, "Ada").unwrap();
        assert!(has_local_profile(&store));
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.write(keys::USER_NAME, "Ada").unwrap();
        store.remove(keys::USER_NAME).unwrap();
        assert_eq!(store.get_raw(keys::USER_NAME).unwrap(), None);
    }
}
