//! JSON-file credential store for the terminal front end.
//!
//! The file holds one flat JSON object of string keys to string values. It is
//! re-read on every access so concurrent invocations see each other's writes.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use studymate::store::{CredentialStore, StoreError};

const STORE_FILE: &str = "credentials.json";

/// Default store location: `$STUDYMATE_HOME/credentials.json`, else
/// `$HOME/.studymate/credentials.json`.
pub fn default_store_path(studymate_home: Option<&str>, home: Option<&str>) -> Option<PathBuf> {
    if let Some(dir) = studymate_home.filter(|d| !d.trim().is_empty()) {
        return Some(Path::new(dir).join(STORE_FILE));
    }
    home.filter(|d| !d.trim().is_empty())
        .map(|dir| Path::new(dir).join(".studymate").join(STORE_FILE))
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "credential file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "credential file is not a JSON object");
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Write(e.to_string()))?;
        fs::write(&self.path, rendered).map_err(|e| StoreError::Write(e.to_string()))
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load();
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e.to_string())),
        }
    }
}
