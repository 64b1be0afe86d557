//! Key/value storage backends for tab persistence
//!
//! The file backend keeps every key in one JSON object stored at
//! `<data_local_dir>/tabdeck/tab_state.json` (see `Config::state_file_path`).

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// String key/value storage owned by the persistence layer.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently present, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// File-backed storage: one JSON object, rewritten atomically on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing or empty file yields an empty store. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = read_entries(&path)?;

        log::debug!(
            "Opened tab state file {:?} ({} keys)",
            path,
            entries.len()
        );
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Open the store at `path`, starting empty if the file is unusable.
    ///
    /// The unusable file is left in place and replaced by the next write.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!(
                    "Tab state file {:?} is unusable ({}), starting with empty state",
                    path,
                    e
                );
                Self {
                    path,
                    entries: Mutex::new(BTreeMap::new()),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents).map_err(|source| StorageError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("a", "1").unwrap();
        assert_eq!(handle.get("a").unwrap().as_deref(), Some("1"));
        handle.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let temp = tempdir().unwrap();
        let store = FileStore::open(temp.path().join("state.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("state.json");

        let store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        store.set("gone", "x").unwrap();
        store.remove("gone").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(reopened.get("gone").unwrap(), None);
    }

    #[test]
    fn file_store_corrupt_file_is_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("state.json");
        fs::write(&path, "{\"k\": ").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Parse(_))
        ));

        let reset = FileStore::open_or_reset(&path);
        assert_eq!(reset.get("k").unwrap(), None);
        reset.set("k", "fresh").unwrap();
        assert_eq!(
            FileStore::open(&path).unwrap().get("k").unwrap().as_deref(),
            Some("fresh")
        );
    }
}
