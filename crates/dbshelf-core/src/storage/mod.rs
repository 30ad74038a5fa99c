//! Storage layer (profile file, settings file, keychain secrets)

pub mod profiles;
pub mod secrets;
pub mod settings;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::profile::ConnectionProfile;

pub use profiles::ProfileFile;
pub use secrets::SecretStore;
pub use settings::SettingsFile;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("home directory not found")]
    NoHomeDir,

    #[error("keychain error: {0}")]
    Keychain(#[from] keyring::Error),
}

/// The persistence collaborator owning the durable profile set
///
/// A [`crate::ProfileStore`] loads its working copy from here at session
/// start and hands the edited set back through [`Self::apply_profiles`];
/// only [`Self::save_profiles`] touches durable storage.
pub trait ProfilePersistence {
    /// Load the authoritative profile set
    ///
    /// # Errors
    /// Returns an error when durable storage cannot be read or parsed.
    fn load_profiles(&mut self) -> Result<Vec<ConnectionProfile>, StorageError>;

    /// Replace the authoritative in-memory set without persisting it
    fn apply_profiles(&mut self, profiles: &[ConnectionProfile]);

    /// Write the authoritative set through to durable storage
    ///
    /// # Errors
    /// Returns an error when durable storage cannot be written.
    fn save_profiles(&mut self) -> Result<(), StorageError>;

    /// Where the durable copy lives
    fn profiles_path(&self) -> &Path;
}

/// Flat string key/value namespace with prefix enumeration
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    /// All keys starting with the given prefix
    fn keys_like(&self, prefix: &str) -> Vec<String>;
}

impl SettingsStore for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        BTreeMap::remove(self, key);
    }

    fn keys_like(&self, prefix: &str) -> Vec<String> {
        self.keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }
}
