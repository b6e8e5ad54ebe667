//! File-backed key-value store: one JSON document per key.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::kv::{KeyValueStore, StoreError};

/// Durable store writing each key to `<dir>/<key>.json`.
///
/// Writes go through a temp file + rename, so a crash mid-write leaves the
/// previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at an explicit directory (created on first write).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the OS app-data directory: `{data_dir}/stockbook`.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .ok_or_else(|| {
                StoreError::Read("failed to resolve OS app data directory".to_string())
            })?;

        let mut dir = base;
        dir.push("stockbook");
        Ok(Self::with_dir(dir))
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read(format!("{key}: {err}"))),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|err| StoreError::Write(format!("{}: {err}", self.dir.display())))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)
            .map_err(|err| StoreError::Write(format!("{}: {err}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|err| StoreError::Write(format!("{}: {err}", path.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::with_dir(dir.path());

        assert!(store.get("transactions").unwrap().is_none());
        store.put("transactions", "[]").unwrap();
        assert_eq!(store.get("transactions").unwrap().as_deref(), Some("[]"));

        store.put("transactions", "[{\"qty\":1}]").unwrap();
        assert_eq!(
            store.get("transactions").unwrap().as_deref(),
            Some("[{\"qty\":1}]")
        );
    }

    #[test]
    fn keys_map_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::with_dir(dir.path());

        store.put("fabrics", "[]").unwrap();
        store.put("inventory", "[]").unwrap();

        assert!(dir.path().join("fabrics.json").exists());
        assert!(dir.path().join("inventory.json").exists());
    }
}
