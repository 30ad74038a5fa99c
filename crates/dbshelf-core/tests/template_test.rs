//! Filter template persistence tests

use std::collections::BTreeMap;

use dbshelf_core::profile::{FilterTemplateStore, TEMPLATE_KEY_PREFIX};
use dbshelf_core::storage::SettingsStore;

fn settings() -> BTreeMap<String, String> {
    BTreeMap::new()
}

#[test]
fn test_add_and_save_round_trip() {
    let mut store = FilterTemplateStore::new();
    let mut values = settings();

    store.add(&values, "System schemas", "pg_%, information_schema");
    store.add(&values, "Temp tables", "temp_%");
    store.save(&mut values);

    assert_eq!(
        SettingsStore::get(&values, "filter.templates.name.0"),
        Some("System schemas")
    );
    assert_eq!(
        SettingsStore::get(&values, "filter.templates.0.definition"),
        Some("pg_%, information_schema")
    );
    assert_eq!(
        SettingsStore::get(&values, "filter.templates.name.1"),
        Some("Temp tables")
    );

    // A fresh store loads the same list back
    let mut reloaded = FilterTemplateStore::new();
    let templates = reloaded.templates(&values);
    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0].name, "System schemas");
    assert_eq!(
        templates[0].filter.expressions(),
        &["pg_%", "information_schema"]
    );
    assert!(templates[0].filter.is_inclusion(), "new templates default to inclusion");
}

#[test]
fn test_definition_splits_on_commas_and_newlines() {
    let mut store = FilterTemplateStore::new();
    let values = settings();

    store.add(&values, "Mixed", "pg_%\nsys, temp_%");
    let templates = store.templates(&values);
    assert_eq!(templates[0].filter.expressions(), &["pg_%", "sys", "temp_%"]);
}

#[test]
fn test_save_prunes_stale_indexes() {
    let mut store = FilterTemplateStore::new();
    let mut values = settings();

    store.add(&values, "One", "a%");
    store.add(&values, "Two", "b%");
    store.add(&values, "Three", "c%");
    store.save(&mut values);

    assert!(store.remove(&values, "Two"));
    store.save(&mut values);

    // The shrunken list leaves no index-2 garbage behind
    assert_eq!(SettingsStore::get(&values, "filter.templates.name.2"), None);
    assert_eq!(
        SettingsStore::get(&values, "filter.templates.2.definition"),
        None
    );
    assert_eq!(SettingsStore::get(&values, "filter.templates.name.1"), Some("Three"));

    let mut reloaded = FilterTemplateStore::new();
    let names: Vec<&str> = reloaded
        .templates(&values)
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["One", "Three"]);
}

#[test]
fn test_remove_unknown_template() {
    let mut store = FilterTemplateStore::new();
    let values = settings();
    assert!(!store.remove(&values, "missing"));
}

#[test]
fn test_unrelated_keys_survive_save() {
    let mut store = FilterTemplateStore::new();
    let mut values = settings();
    values.set("editor.font.size", "14");
    values.set(&format!("{TEMPLATE_KEY_PREFIX}.name.0"), "Stale");
    values.set(&format!("{TEMPLATE_KEY_PREFIX}.0.definition"), "x%");

    // Loading picks up the pre-existing template; saving an emptied list
    // prunes it but leaves unrelated keys alone.
    assert_eq!(store.templates(&values).len(), 1);
    assert!(store.remove(&values, "Stale"));
    store.save(&mut values);

    assert_eq!(SettingsStore::get(&values, "editor.font.size"), Some("14"));
    assert_eq!(SettingsStore::get(&values, "filter.templates.name.0"), None);
}
