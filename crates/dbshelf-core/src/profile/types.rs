//! Connection profile record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::key::ProfileKey;
use super::object_filter::ObjectNameFilter;

/// Unique identifier of a profile record
pub type ProfileId = Uuid;

/// Name of the group profiles belong to when none is set
pub const DEFAULT_GROUP: &str = "Default group";

/// A saved database connection configuration
///
/// Field writes go through setters so that the record can track whether it
/// was modified since it was loaded (`is_changed`) and whether it was moved
/// to a different group (`is_group_changed`). Record identity is the `id`;
/// lookup identity is `(name, group)` via [`ProfileKey`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Unique identifier
    id: ProfileId,
    /// Display name
    name: String,
    /// Optional group; `None` means [`DEFAULT_GROUP`]
    #[serde(default)]
    group: Option<String>,
    /// JDBC-style connection URL
    #[serde(default)]
    url: String,
    /// Driver class name
    #[serde(default)]
    driver_class: String,
    /// Display name of the driver definition
    #[serde(default)]
    driver_name: String,
    /// Login user
    #[serde(default)]
    username: String,
    /// Open connections with autocommit enabled
    #[serde(default)]
    autocommit: bool,
    /// Open connections read-only
    #[serde(default)]
    read_only: bool,
    /// Ask before running UPDATE/DELETE statements
    #[serde(default)]
    confirm_updates: bool,
    /// Keep the password in the system keychain
    #[serde(default = "default_true")]
    store_password: bool,
    /// Result set fetch size
    #[serde(default)]
    fetch_size: Option<u32>,
    /// Connect timeout in seconds
    #[serde(default)]
    connect_timeout_secs: Option<u64>,
    /// Schema name filter applied to the object browser
    #[serde(default)]
    schema_filter: Option<ObjectNameFilter>,
    /// Catalog name filter applied to the object browser
    #[serde(default)]
    catalog_filter: Option<ObjectNameFilter>,
    /// SQL run right after connecting
    #[serde(default)]
    connect_script: Option<String>,
    /// SQL run right before disconnecting
    #[serde(default)]
    disconnect_script: Option<String>,
    /// SQL run when the connection has been idle
    #[serde(default)]
    idle_script: Option<String>,
    /// Free-form tags used for filtering
    #[serde(default)]
    tags: BTreeSet<String>,
    /// When created
    created_at: DateTime<Utc>,
    /// When last updated
    modified_at: DateTime<Utc>,
    /// Modified since load
    #[serde(skip)]
    changed: bool,
    /// Moved to a different group since load
    #[serde(skip)]
    group_changed: bool,
}

fn default_true() -> bool {
    true
}

impl ConnectionProfile {
    /// Create a new, empty profile with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            group: None,
            url: String::new(),
            driver_class: String::new(),
            driver_name: String::new(),
            username: String::new(),
            autocommit: false,
            read_only: false,
            confirm_updates: false,
            store_password: true,
            fetch_size: None,
            connect_timeout_secs: None,
            schema_filter: None,
            catalog_filter: None,
            connect_script: None,
            disconnect_script: None,
            idle_script: None,
            tags: BTreeSet::new(),
            created_at: now,
            modified_at: now,
            changed: false,
            group_changed: false,
        }
    }

    /// Create a copy of this profile with a fresh identity
    ///
    /// The copy carries all connection settings of the original but a new
    /// `id`, so both can live side by side (even under the same name). The
    /// copy starts out marked as changed; the original is untouched.
    #[must_use]
    pub fn create_copy(&self) -> Self {
        let now = Utc::now();
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.created_at = now;
        copy.modified_at = now;
        copy.changed = true;
        copy.group_changed = false;
        copy
    }

    #[must_use]
    pub fn id(&self) -> ProfileId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw group attribute; `None` means the profile lives in the default group
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Group this profile belongs to, resolving unset/blank to [`DEFAULT_GROUP`]
    #[must_use]
    pub fn group_or_default(&self) -> &str {
        match self.group.as_deref() {
            Some(g) if !g.trim().is_empty() => g,
            _ => DEFAULT_GROUP,
        }
    }

    /// Lookup key for this profile
    #[must_use]
    pub fn key(&self) -> ProfileKey {
        match self.group.as_deref() {
            Some(g) if !g.trim().is_empty() => ProfileKey::with_group(&self.name, g),
            _ => ProfileKey::new(&self.name),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn driver_class(&self) -> &str {
        &self.driver_class
    }

    #[must_use]
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn is_autocommit(&self) -> bool {
        self.autocommit
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn is_confirm_updates(&self) -> bool {
        self.confirm_updates
    }

    #[must_use]
    pub fn is_store_password(&self) -> bool {
        self.store_password
    }

    #[must_use]
    pub fn fetch_size(&self) -> Option<u32> {
        self.fetch_size
    }

    #[must_use]
    pub fn connect_timeout_secs(&self) -> Option<u64> {
        self.connect_timeout_secs
    }

    #[must_use]
    pub fn schema_filter(&self) -> Option<&ObjectNameFilter> {
        self.schema_filter.as_ref()
    }

    #[must_use]
    pub fn catalog_filter(&self) -> Option<&ObjectNameFilter> {
        self.catalog_filter.as_ref()
    }

    #[must_use]
    pub fn connect_script(&self) -> Option<&str> {
        self.connect_script.as_deref()
    }

    #[must_use]
    pub fn disconnect_script(&self) -> Option<&str> {
        self.disconnect_script.as_deref()
    }

    #[must_use]
    pub fn idle_script(&self) -> Option<&str> {
        self.idle_script.as_deref()
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Modified since it was loaded or last saved
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Moved to a different group since it was loaded or last saved
    #[must_use]
    pub fn is_group_changed(&self) -> bool {
        self.group_changed
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.name != name {
            self.name = name;
            self.touch();
        }
    }

    /// Assign the profile to a group; blank or `None` means the default group
    ///
    /// Marks the profile both changed and group-changed when the group
    /// actually differs.
    pub fn set_group(&mut self, group: Option<String>) {
        let group = group.filter(|g| !g.trim().is_empty());
        if self.group != group {
            self.group = group;
            self.group_changed = true;
            self.touch();
        }
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        if self.url != url {
            self.url = url;
            self.touch();
        }
    }

    pub fn set_driver_class(&mut self, driver_class: impl Into<String>) {
        let driver_class = driver_class.into();
        if self.driver_class != driver_class {
            self.driver_class = driver_class;
            self.touch();
        }
    }

    pub fn set_driver_name(&mut self, driver_name: impl Into<String>) {
        let driver_name = driver_name.into();
        if self.driver_name != driver_name {
            self.driver_name = driver_name;
            self.touch();
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        let username = username.into();
        if self.username != username {
            self.username = username;
            self.touch();
        }
    }

    pub fn set_autocommit(&mut self, autocommit: bool) {
        if self.autocommit != autocommit {
            self.autocommit = autocommit;
            self.touch();
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        if self.read_only != read_only {
            self.read_only = read_only;
            self.touch();
        }
    }

    pub fn set_confirm_updates(&mut self, confirm_updates: bool) {
        if self.confirm_updates != confirm_updates {
            self.confirm_updates = confirm_updates;
            self.touch();
        }
    }

    pub fn set_store_password(&mut self, store_password: bool) {
        if self.store_password != store_password {
            self.store_password = store_password;
            self.touch();
        }
    }

    pub fn set_fetch_size(&mut self, fetch_size: Option<u32>) {
        if self.fetch_size != fetch_size {
            self.fetch_size = fetch_size;
            self.touch();
        }
    }

    pub fn set_connect_timeout_secs(&mut self, timeout: Option<u64>) {
        if self.connect_timeout_secs != timeout {
            self.connect_timeout_secs = timeout;
            self.touch();
        }
    }

    pub fn set_schema_filter(&mut self, filter: Option<ObjectNameFilter>) {
        if self.schema_filter != filter {
            self.schema_filter = filter;
            self.touch();
        }
    }

    pub fn set_catalog_filter(&mut self, filter: Option<ObjectNameFilter>) {
        if self.catalog_filter != filter {
            self.catalog_filter = filter;
            self.touch();
        }
    }

    pub fn set_connect_script(&mut self, script: Option<String>) {
        if self.connect_script != script {
            self.connect_script = script;
            self.touch();
        }
    }

    pub fn set_disconnect_script(&mut self, script: Option<String>) {
        if self.disconnect_script != script {
            self.disconnect_script = script;
            self.touch();
        }
    }

    pub fn set_idle_script(&mut self, script: Option<String>) {
        if self.idle_script != script {
            self.idle_script = script;
            self.touch();
        }
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into().trim().to_string();
        if !tag.is_empty() && self.tags.insert(tag) {
            self.touch();
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        if self.tags.remove(tag.trim()) {
            self.touch();
        }
    }

    pub fn set_tags(&mut self, tags: BTreeSet<String>) {
        if self.tags != tags {
            self.tags = tags;
            self.touch();
        }
    }

    /// Clear the dirty flags after the profile has been saved
    pub fn clear_dirty(&mut self) {
        self.changed = false;
        self.group_changed = false;
    }

    fn touch(&mut self) {
        self.changed = true;
        self.modified_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_clean() {
        let profile = ConnectionProfile::new("Prod DB");
        assert!(!profile.is_changed());
        assert!(!profile.is_group_changed());
        assert_eq!(profile.group_or_default(), DEFAULT_GROUP);
    }

    #[test]
    fn test_setters_mark_changed() {
        let mut profile = ConnectionProfile::new("Prod DB");
        profile.set_url("jdbc:postgresql://db1/prod");
        assert!(profile.is_changed());

        let mut profile = ConnectionProfile::new("Prod DB");
        profile.set_url("");
        assert!(!profile.is_changed(), "writing the same value stays clean");
    }

    #[test]
    fn test_set_group_marks_group_changed() {
        let mut profile = ConnectionProfile::new("Prod DB");
        profile.set_group(Some("Work".to_string()));
        assert!(profile.is_group_changed());
        assert_eq!(profile.group_or_default(), "Work");

        // Blank group falls back to the default group
        profile.set_group(Some("   ".to_string()));
        assert_eq!(profile.group_or_default(), DEFAULT_GROUP);
    }

    #[test]
    fn test_create_copy_has_fresh_identity() {
        let mut original = ConnectionProfile::new("Prod DB");
        original.set_group(Some("Work".to_string()));
        original.clear_dirty();

        let copy = original.create_copy();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.name(), original.name());
        assert!(copy.is_changed());
        assert!(!original.is_changed());
    }

    #[test]
    fn test_key_includes_group_only_when_set() {
        let mut profile = ConnectionProfile::new("Prod DB");
        assert_eq!(profile.key().to_string(), "Prod DB");
        profile.set_group(Some("Work".to_string()));
        assert_eq!(profile.key().to_string(), "{Work}/Prod DB");
    }
}
