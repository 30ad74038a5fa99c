//! File-backed profile persistence
//!
//! Profiles are stored as pretty-printed JSON at
//! `<config-dir>/profiles.json`. A missing file is an empty profile set,
//! so a fresh installation starts without errors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::profile::ConnectionProfile;

use super::{ProfilePersistence, StorageError};

/// JSON-file implementation of the persistence collaborator
#[derive(Debug, Clone, Default)]
pub struct ProfileFile {
    path: PathBuf,
    profiles: Vec<ConnectionProfile>,
}

impl ProfileFile {
    #[must_use]
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("profiles.json"),
            profiles: Vec::new(),
        }
    }

    /// The authoritative set as last loaded or applied
    #[must_use]
    pub fn profiles(&self) -> &[ConnectionProfile] {
        &self.profiles
    }
}

impl ProfilePersistence for ProfileFile {
    fn load_profiles(&mut self) -> Result<Vec<ConnectionProfile>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                self.profiles =
                    serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
                        path: self.path.clone(),
                        source,
                    })?;
                tracing::debug!(path = %self.path.display(), count = self.profiles.len(), "loaded profiles");
                Ok(self.profiles.clone())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.profiles.clear();
                Ok(Vec::new())
            }
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn apply_profiles(&mut self, profiles: &[ConnectionProfile]) {
        self.profiles = profiles.to_vec();
    }

    fn save_profiles(&mut self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let serialized =
            serde_json::to_string_pretty(&self.profiles).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, serialized).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = self.profiles.len(), "wrote profiles");
        Ok(())
    }

    fn profiles_path(&self) -> &Path {
        &self.path
    }
}
