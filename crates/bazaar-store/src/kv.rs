//! Key-Value store wrapper with automatic serialization.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace};

use crate::StoreError;

/// Type-safe store backed by an in-memory map or a data directory.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Every `set` replaces the whole value
/// stored under a key. Handles are cheap to clone and share the backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<Backend>,
}

enum Backend {
    Memory(RwLock<HashMap<String, Vec<u8>>>),
    Directory(PathBuf),
}

impl Store {
    /// Open an empty store that lives only as long as its handles.
    ///
    /// # Example
    ///
    /// ```
    /// use bazaar_store::Store;
    ///
    /// let store = Store::in_memory();
    /// store.set("greeting", &"namaste").unwrap();
    /// let value: Option<String> = store.get("greeting").unwrap();
    /// assert_eq!(value.as_deref(), Some("namaste"));
    /// ```
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(RwLock::new(HashMap::new()))),
        }
    }

    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// Each key is kept in its own `<key>.json` file.
    ///
    /// ```rust,ignore
    /// let store = Store::open("./.bazaar")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| StoreError::OpenError(format!("{}: {}", dir.display(), e)))?;
        if !dir.is_dir() {
            return Err(StoreError::OpenError(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        debug!(path = %dir.display(), "opened directory store");
        Ok(Self {
            backend: Arc::new(Backend::Directory(dir.to_path_buf())),
        })
    }

    /// Directory backing this store, if it is file-backed.
    pub fn location(&self) -> Option<&Path> {
        match self.backend.as_ref() {
            Backend::Directory(dir) => Some(dir),
            Backend::Memory(_) => None,
        }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// bytes don't decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the store, replacing whatever was there.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }

    /// Delete a value. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        trace!(key, "delete");
        match self.backend.as_ref() {
            Backend::Memory(map) => {
                map.write().remove(key);
                Ok(())
            }
            Backend::Directory(dir) => match fs::remove_file(entry_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StoreError::io(key, e)),
            },
        }
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        match self.backend.as_ref() {
            Backend::Memory(map) => Ok(map.read().contains_key(key)),
            Backend::Directory(dir) => Ok(entry_path(dir, key).is_file()),
        }
    }

    /// Get all keys in the store, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = match self.backend.as_ref() {
            Backend::Memory(map) => map.read().keys().cloned().collect::<Vec<_>>(),
            Backend::Directory(dir) => {
                let mut keys = Vec::new();
                let entries = fs::read_dir(dir).map_err(|e| StoreError::io("*", e))?;
                for entry in entries {
                    let path = entry.map_err(|e| StoreError::io("*", e))?.path();
                    if path.extension().is_some_and(|ext| ext == "json") {
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            if validate_key(stem).is_ok() {
                                keys.push(stem.to_string());
                            }
                        }
                    }
                }
                keys
            }
        };
        keys.sort();
        Ok(keys)
    }

    /// Read the raw bytes stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        trace!(key, "get");
        match self.backend.as_ref() {
            Backend::Memory(map) => Ok(map.read().get(key).cloned()),
            Backend::Directory(dir) => match fs::read(entry_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StoreError::io(key, e)),
            },
        }
    }

    /// Write raw bytes under `key` without going through serde.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        trace!(key, len = bytes.len(), "set");
        match self.backend.as_ref() {
            Backend::Memory(map) => {
                map.write().insert(key.to_string(), bytes.to_vec());
                Ok(())
            }
            Backend::Directory(dir) => {
                // Write beside the target and rename so readers never see a torn file.
                let target = entry_path(dir, key);
                let staging = dir.join(format!(".{}.json.tmp", key));
                fs::write(&staging, bytes).map_err(|e| StoreError::io(key, e))?;
                fs::rename(&staging, &target).map_err(|e| StoreError::io(key, e))
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.backend.as_ref() {
            Backend::Memory(_) => f.write_str("Store(memory)"),
            Backend::Directory(dir) => write!(f, "Store({})", dir.display()),
        }
    }
}

fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", key))
}

/// Keys double as file names, so keep them to a portable alphabet.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
