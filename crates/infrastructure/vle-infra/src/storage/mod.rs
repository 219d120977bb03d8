//! Key-value session storage.
//!
//! The application only ever sees [`SessionStorage`]. Absent keys are `None`,
//! never an error.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use tracing::debug;

const QUALIFIER: &str = "com";
const ORG: &str = "vle";
const APP: &str = "forms";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

pub trait SessionStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry or none of them.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.set_many(&[(key, value)])
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut map = self.entries();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// A JSON object on disk. Every write replaces the whole file through a temp
/// file and rename, so readers see either the old or the new contents.
#[derive(Debug)]
pub struct FileStorage {
    path: Utf8PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `session.json` in the platform config directory.
    pub fn default_path() -> Result<Utf8PathBuf, StorageError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(StorageError::NoConfigDir)?;
        let dir = Utf8Path::from_path(dirs.config_dir())
            .ok_or_else(|| StorageError::InvalidPath(dirs.config_dir().display().to_string()))?;
        Ok(dir.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(map)?;
        atomic_write(&self.path, json.as_bytes())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard();
        Ok(self.load()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut map = self.load()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        self.save(&map)?;
        debug!(path = %self.path, keys = entries.len(), "session storage written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

fn atomic_write(path: &Utf8Path, contents: &[u8]) -> Result<(), StorageError> {
    let tmp_path = Utf8PathBuf::from(format!("{path}.tmp"));

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)?;
        }
        Err(e) => {
            fs::remove_file(&tmp_path).ok();
            return Err(e.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_absent_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("userToken").unwrap(), None);
        storage.set("userToken", "abc".into()).unwrap();
        assert_eq!(storage.get("userToken").unwrap().as_deref(), Some("abc"));
        storage.remove("userToken").unwrap();
        assert!(storage.is_empty());
    }
}
