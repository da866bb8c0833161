//! Key-value client storage, the stand-in for browser local storage.
//!
//! [`FileStorage`] keeps a flat JSON object on disk so values survive between
//! runs. Writes land in a temporary sibling first and are renamed into place,
//! so a crash never leaves a half-written file behind.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value persistence.
pub trait ClientStorage {
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// Returns an error if the backend cannot be updated.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let encoded = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, encoded).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), keys = entries.len(), "storage written");
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let _lock = self.guard.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_all()?;
        if apply(&mut entries) {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

impl ClientStorage for FileStorage {
    #[instrument(level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _lock = self.guard.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    #[instrument(level = "trace", skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    #[instrument(level = "trace", skip(self))]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() -> Result<(), StorageError> {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("role")?, None);
        storage.set("role", "ADMIN")?;
        assert_eq!(storage.get("role")?, Some("ADMIN".to_string()));
        storage.remove("role")?;
        assert_eq!(storage.get("role")?, None);
        Ok(())
    }

    #[test]
    fn file_storage_survives_reopen() -> Result<(), StorageError> {
        let dir = tempfile::tempdir().map_err(|source| StorageError::Io {
            path: PathBuf::new(),
            source,
        })?;
        let path = dir.path().join("nested").join("session.json");

        let storage = FileStorage::new(&path);
        storage.set("accessToken", "abc")?;
        storage.set("role", "VIEWER")?;

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("accessToken")?, Some("abc".to_string()));
        assert_eq!(reopened.get("role")?, Some("VIEWER".to_string()));

        reopened.remove("accessToken")?;
        assert_eq!(storage.get("accessToken")?, None);
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn file_storage_missing_file_is_empty() -> Result<(), StorageError> {
        let dir = tempfile::tempdir().map_err(|source| StorageError::Io {
            path: PathBuf::new(),
            source,
        })?;
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("user")?, None);
        // removing from an empty store must not create the file
        storage.remove("user")?;
        assert!(!storage.path().exists());
        Ok(())
    }

    #[test]
    fn file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2, 3]").expect("write fixture");

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("role"), Err(StorageError::Corrupt { .. })));
    }
}
