use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SessionStoreError;

/// Flat string key/value storage backing a [`crate::SessionStore`].
///
/// Writes are atomic per key: a reader never observes a partially written
/// value.
pub trait KeyValueMedium: Send {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SessionStoreError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError>;
    fn clear(&mut self) -> Result<(), SessionStoreError>;
}

/// Process-local medium whose lifetime is the owning store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryMedium {
    entries: BTreeMap<String, String>,
}

impl MemoryMedium {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw values, bypassing any encoding.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionStoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionStoreError> {
        self.entries.clear();
        Ok(())
    }
}

/// Medium persisted as one flat JSON object of string values.
///
/// The whole object is rewritten through a sibling temp file and renamed into
/// place on every mutation.
#[derive(Debug)]
pub struct JsonFileMedium {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileMedium {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self, SessionStoreError> {
        let path = path.to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw)
                .map_err(|source| SessionStoreError::json_file(&path, source))?,
            Err(error) if error.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(SessionStoreError::io("reading key/value file", &path, source))
            }
        };

        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `entries` to disk. The in-memory view is only replaced by the
    /// caller once this succeeds.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| SessionStoreError::io("creating key/value dir", parent, source))?;
        }

        let encoded = serde_json::to_string_pretty(entries)
            .map_err(|source| SessionStoreError::json_file_write(&self.path, source))?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, encoded)
            .map_err(|source| SessionStoreError::io("writing key/value file", &staging, source))?;
        fs::rename(&staging, &self.path)
            .map_err(|source| SessionStoreError::io("replacing key/value file", &self.path, source))
    }
}

impl KeyValueMedium for JsonFileMedium {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionStoreError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionStoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionStoreError> {
        let next = BTreeMap::new();
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}
