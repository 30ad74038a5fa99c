//! Keychain-backed password storage
//!
//! Passwords never go into the profile file; profiles that opt in via
//! `store_password` keep theirs in the system keychain (macOS Keychain,
//! Windows Credential Manager, Secret Service on Linux), keyed by profile
//! id and username.

use keyring::Entry;

use crate::profile::ProfileId;

use super::StorageError;

const SERVICE_NAME: &str = "dbshelf";

/// Per-profile password storage in the system keychain
#[derive(Debug, Clone)]
pub struct SecretStore {
    service: String,
}

impl SecretStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Read a stored password; `Ok(None)` when none is stored
    ///
    /// # Errors
    /// Returns an error when the keychain cannot be accessed.
    pub fn read_password(
        &self,
        profile_id: ProfileId,
        username: &str,
    ) -> Result<Option<String>, StorageError> {
        let entry = self.entry(profile_id, username)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Store a password for a profile
    ///
    /// # Errors
    /// Returns an error when the keychain cannot be accessed.
    pub fn write_password(
        &self,
        profile_id: ProfileId,
        username: &str,
        password: &str,
    ) -> Result<(), StorageError> {
        let entry = self.entry(profile_id, username)?;
        entry.set_password(password)?;
        Ok(())
    }

    /// Remove a stored password; a missing entry is a no-op
    ///
    /// # Errors
    /// Returns an error when the keychain cannot be accessed.
    pub fn delete_password(
        &self,
        profile_id: ProfileId,
        username: &str,
    ) -> Result<(), StorageError> {
        let entry = self.entry(profile_id, username)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn entry(&self, profile_id: ProfileId, username: &str) -> Result<Entry, StorageError> {
        let account = format!("{profile_id}:{username}");
        Ok(Entry::new(&self.service, &account)?)
    }
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::new()
    }
}
