//! Persistent key/value storage.
//!
//! A small string-to-string store shaped like a browser's local storage.
//! Values are opaque strings; callers that need structure (the quote map)
//! encode it themselves. The file backend keeps everything in one JSON
//! document and rewrites it on every change.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Key holding the JSON-encoded quote map
pub const CUSTOM_QUOTES_KEY: &str = "customQuotes";
/// Key holding the chosen backdrop
pub const BACKGROUND_KEY: &str = "backgroundPreference";
/// Key holding the light/dark choice
pub const THEME_KEY: &str = "themePreference";

const FILE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write storage file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode storage file: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Backend of a [`Storage`] handle
pub trait StorageBackend: Send {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// On-disk format
#[derive(Debug, Serialize, Deserialize)]
struct StorageFile {
    version: u32,
    items: HashMap<String, String>,
}

impl Default for StorageFile {
    fn default() -> Self {
        Self {
            version: FILE_VERSION,
            items: HashMap::new(),
        }
    }
}

/// JSON file backend
pub struct FileBackend {
    path: PathBuf,
    items: HashMap<String, String>,
}

impl FileBackend {
    /// Open the storage file at `path`.
    ///
    /// A missing, unreadable or corrupt file yields empty storage; the next
    /// write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match Self::read(&path) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Ignoring storage file {}: {:#}", path.display(), e);
                HashMap::new()
            }
        };
        Self { path, items }
    }

    /// Default location under the user's data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("motivational-calendar")
            .join("storage.json")
    }

    fn read(path: &Path) -> anyhow::Result<HashMap<String, String>> {
        use anyhow::Context;

        if !path.exists() {
            tracing::debug!("No storage file found, starting fresh");
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path).context("Failed to read storage file")?;
        let file: StorageFile =
            serde_json::from_str(&content).context("Failed to parse storage file")?;

        tracing::info!("Loaded {} storage items", file.items.len());
        Ok(file.items)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn flush(&self) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let file = StorageFile {
            version: FILE_VERSION,
            items: self.items.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        // Write a sibling first so a failed write never truncates the file
        let tmp = self.tmp_path();
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        tracing::debug!("Saved {} storage items", self.items.len());
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => self.items.insert(key.to_string(), old),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// Volatile backend, used when no file should be touched
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Shared handle to the process-wide storage
#[derive(Clone)]
pub struct Storage {
    inner: Arc<Mutex<Box<dyn StorageBackend>>>,
}

impl Storage {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(backend))),
        }
    }

    /// File-backed storage at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::open(path))
    }

    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.inner.lock().get_item(key)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.lock().set_item(key, value)
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
