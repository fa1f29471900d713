//! Key/value storage for the settings and score files.
//!
//! Components never touch the filesystem directly; they are handed a
//! `Storage` at construction. `FileStore` keeps one file per key under a data
//! directory, `MemoryStore` keeps everything in a map for tests.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Backing store for persisted documents, addressed by key.
pub trait Storage: Send + Sync {
    /// Read a document. `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a document.
    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError>;
}

/// Shared handle injected into the settings and score components.
pub type SharedStorage = Arc<dyn Storage>;

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Default data directory, `~/.snake/`.
    pub fn default_dir() -> Result<PathBuf, StorageError> {
        let home_dir = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
        Ok(home_dir.join(crate::constants::DATA_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        // Write beside the target, then rename over it: readers never see a partial document.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.tmp"));
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<MemoryStore> {
        Arc::new(Self::new())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.docs
            .lock()
            .map(|docs| docs.contains_key(key))
            .unwrap_or(false)
    }
}

impl Storage for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let docs = self
            .docs
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store poisoned"))?;
        Ok(docs.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        let mut docs = self
            .docs
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store poisoned"))?;
        docs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Load a JSON document, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(store: &dyn Storage, key: &str) -> T {
    match store.read(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("{key} is unreadable, using defaults: {e}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!("could not read {key}: {e}");
            T::default()
        }
    }
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: Serialize>(store: &dyn Storage, key: &str, data: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(data)?;
    store.write(key, &json)
}
