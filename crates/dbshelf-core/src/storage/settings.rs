//! File-backed settings store
//!
//! A flat string key/value namespace persisted as JSON at
//! `<config-dir>/settings.json`. Used for filter templates and other small
//! pieces of client state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{SettingsStore, StorageError};

/// JSON-file implementation of [`SettingsStore`]
#[derive(Debug, Clone, Default)]
pub struct SettingsFile {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl SettingsFile {
    #[must_use]
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("settings.json"),
            values: BTreeMap::new(),
        }
    }

    /// Read the settings file; a missing file is an empty namespace
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(&mut self) -> Result<(), StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                self.values =
                    serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
                        path: self.path.clone(),
                        source,
                    })?;
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.values.clear();
                Ok(())
            }
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the namespace back to disk
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    pub fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let serialized =
            serde_json::to_string_pretty(&self.values).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, serialized).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for SettingsFile {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn keys_like(&self, prefix: &str) -> Vec<String> {
        self.values
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }
}
