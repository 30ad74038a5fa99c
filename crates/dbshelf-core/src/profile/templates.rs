//! Reusable filter templates
//!
//! Named schema/catalog filter-expression sets that can be applied to a
//! profile's object-name filter. Templates are persisted in the flat
//! settings namespace under a numeric suffix per template:
//! `<prefix>.name.<i>` for the name and `<prefix>.<i>.definition` for the
//! expression list.

use serde::{Deserialize, Serialize};

use super::object_filter::ObjectNameFilter;
use crate::storage::SettingsStore;

/// Settings-key prefix for persisted filter templates
pub const TEMPLATE_KEY_PREFIX: &str = "filter.templates";

/// A named, reusable filter-expression set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTemplate {
    /// Template name shown to the user
    pub name: String,
    /// The expression set; inclusion defaults to `true` for new templates
    pub filter: ObjectNameFilter,
}

/// CRUD over the persisted filter-template list
///
/// Templates are loaded lazily on first access and written back as a whole
/// via [`Self::save`]. Mutations only touch the in-memory list until then.
#[derive(Debug, Default)]
pub struct FilterTemplateStore {
    templates: Vec<FilterTemplate>,
    loaded: bool,
}

impl FilterTemplateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current template list, loading it from settings on first access
    pub fn templates(&mut self, settings: &dyn SettingsStore) -> &[FilterTemplate] {
        self.ensure_loaded(settings);
        &self.templates
    }

    /// Parse a definition string and append a new template in memory
    ///
    /// The definition is split on commas and newlines; inclusion defaults
    /// to `true`.
    pub fn add(&mut self, settings: &dyn SettingsStore, name: &str, definition: &str) {
        self.ensure_loaded(settings);
        self.templates.push(FilterTemplate {
            name: name.trim().to_string(),
            filter: ObjectNameFilter::from_definition(definition, true),
        });
    }

    /// Drop the first template with the given name; reports whether one existed
    pub fn remove(&mut self, settings: &dyn SettingsStore, name: &str) -> bool {
        self.ensure_loaded(settings);
        match self.templates.iter().position(|t| t.name == name) {
            Some(pos) => {
                self.templates.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Write the in-memory list back to the settings namespace
    ///
    /// Templates are stored by positional index. Keys whose index lies
    /// beyond the current list length are removed, so shrinking the list
    /// leaves no stale entries behind.
    pub fn save(&mut self, settings: &mut dyn SettingsStore) {
        for (i, template) in self.templates.iter().enumerate() {
            settings.set(&format!("{TEMPLATE_KEY_PREFIX}.name.{i}"), &template.name);
            settings.set(
                &format!("{TEMPLATE_KEY_PREFIX}.{i}.definition"),
                &template.filter.expressions().join(", "),
            );
        }
        let len = self.templates.len();
        for key in settings.keys_like(TEMPLATE_KEY_PREFIX) {
            if template_index(&key).is_some_and(|i| i >= len) {
                settings.remove(&key);
            }
        }
        tracing::debug!(count = len, "saved filter templates");
    }

    fn ensure_loaded(&mut self, settings: &dyn SettingsStore) {
        if self.loaded {
            return;
        }
        self.templates.clear();
        let mut i = 0;
        while let Some(name) = settings.get(&format!("{TEMPLATE_KEY_PREFIX}.name.{i}")) {
            let definition = settings
                .get(&format!("{TEMPLATE_KEY_PREFIX}.{i}.definition"))
                .unwrap_or_default();
            self.templates.push(FilterTemplate {
                name: name.to_string(),
                filter: ObjectNameFilter::from_definition(definition, true),
            });
            i += 1;
        }
        self.loaded = true;
    }
}

/// Extract the template index from either persisted key shape
fn template_index(key: &str) -> Option<usize> {
    let rest = key.strip_prefix(TEMPLATE_KEY_PREFIX)?.strip_prefix('.')?;
    if let Some(i) = rest.strip_prefix("name.") {
        return i.parse().ok();
    }
    rest.strip_suffix(".definition")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_index_both_key_shapes() {
        assert_eq!(template_index("filter.templates.name.3"), Some(3));
        assert_eq!(template_index("filter.templates.3.definition"), Some(3));
        assert_eq!(template_index("filter.templates.other"), None);
        assert_eq!(template_index("unrelated.key"), None);
    }
}
