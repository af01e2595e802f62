use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use client_logging::client_warn;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Fixed key under which the bearer token lives.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state directory missing or not writable: {0}")]
    StateDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Persistent string key/value store scoped to one state directory.
///
/// Reads never fail the caller: a missing or unreadable value is absent.
/// Writes are best-effort and logged on error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// Removes every stored value, token and history alike.
    fn clear(&self);
}

/// One file per key, written atomically via a temp file and rename.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) the state directory and probes that it is
    /// writable.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        if dir.exists() {
            let meta = fs::metadata(&dir).map_err(|e| StoreError::StateDir(e.to_string()))?;
            if !meta.is_dir() {
                return Err(StoreError::StateDir("path is not a directory".into()));
            }
        } else {
            fs::create_dir_all(&dir).map_err(|e| StoreError::StateDir(e.to_string()))?;
        }
        NamedTempFile::new_in(&dir).map_err(|e| StoreError::StateDir(e.to_string()))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn write_atomic(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let target = self.key_path(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                client_warn!("Failed to read stored value {:?}: {}", key, err);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.write_atomic(key, value) {
            client_warn!("Failed to persist value {:?}: {}", key, err);
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => client_warn!("Failed to remove stored value {:?}: {}", key, err),
        }
    }

    fn clear(&self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                client_warn!("Failed to clear state directory: {}", err);
                return;
            }
        };
        for entry in entries.flatten() {
            if let Err(err) = fs::remove_file(entry.path()) {
                client_warn!("Failed to remove {:?}: {}", entry.path(), err);
            }
        }
    }
}

/// In-memory store used by tests and headless tooling.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }

    fn clear(&self) {
        if let Ok(mut values) = self.values.lock() {
            values.clear();
        }
    }
}
