//! Key-value persistence abstraction.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Store operation error (infrastructure-level, as opposed to domain errors).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key-value store: whole-document reads and writes under fixed keys.
///
/// Implementations must treat `put` as a complete overwrite of the prior
/// value; there is no incremental or streaming IO.
pub trait KeyValueStore: Send + Sync {
    /// Read the full document stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the full document stored under `key`.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value)
    }
}

/// In-memory key-value store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Read("lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Write("lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_key() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.get("fabrics").unwrap().is_none());
    }

    #[test]
    fn put_overwrites_prior_value() {
        let store = InMemoryKeyValueStore::new();
        store.put("inventory", "[1]").unwrap();
        store.put("inventory", "[2]").unwrap();
        assert_eq!(store.get("inventory").unwrap().as_deref(), Some("[2]"));
    }
}
