//! Profile CLI commands
//!
//! Handles: dbshelf list/show/add/rm/mv/copy/rm-group/tag
//!
//! Each command opens an edit session (loads the profile file into a
//! [`ProfileStore`]), performs its operation, and writes the result back.

use anyhow::{bail, Context};
use clap::Args;
use std::collections::BTreeSet;
use std::path::Path;

use dbshelf_core::profile::{ConnectionProfile, ProfileId, ProfileKey, ProfileStore};
use dbshelf_core::storage::{ProfileFile, ProfilePersistence};

/// Arguments for `dbshelf add`
#[derive(Args)]
pub struct AddArgs {
    /// Profile name
    pub name: String,

    /// Group to place the profile in (default group if omitted)
    #[arg(long)]
    pub group: Option<String>,

    /// Connection URL
    #[arg(long)]
    pub url: Option<String>,

    /// Driver class name
    #[arg(long)]
    pub driver_class: Option<String>,

    /// Display name of the driver definition
    #[arg(long)]
    pub driver_name: Option<String>,

    /// Login user
    #[arg(long)]
    pub username: Option<String>,

    /// Open connections read-only
    #[arg(long)]
    pub read_only: bool,

    /// Open connections with autocommit enabled
    #[arg(long)]
    pub autocommit: bool,

    /// Tags (can specify multiple times)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

struct Session {
    file: ProfileFile,
    store: ProfileStore,
}

fn open(config_dir: &Path) -> anyhow::Result<Session> {
    let mut file = ProfileFile::new(config_dir);
    let initial = file
        .load_profiles()
        .with_context(|| format!("failed to load {}", file.profiles_path().display()))?;
    let mut store = ProfileStore::new();
    store.load(&initial);
    Ok(Session { file, store })
}

fn save(session: &mut Session) -> anyhow::Result<()> {
    session
        .store
        .save_profiles(&mut session.file)
        .with_context(|| {
            format!(
                "failed to save {}",
                session.file.profiles_path().display()
            )
        })
}

/// Resolve a key argument to a profile id
fn resolve(store: &ProfileStore, key: &str) -> anyhow::Result<ProfileId> {
    let parsed: ProfileKey = key.parse()?;
    let profile = store
        .find(&parsed)
        .with_context(|| format!("no profile matches '{key}'"))?;
    Ok(profile.id())
}

pub fn execute_list(
    config_dir: &Path,
    name_filter: Option<&str>,
    tags: &[String],
) -> anyhow::Result<()> {
    let mut session = open(config_dir)?;

    if let Some(text) = name_filter {
        session.store.apply_name_filter(text);
    }
    if !tags.is_empty() {
        let tags: BTreeSet<String> = tags.iter().map(|t| t.trim().to_string()).collect();
        session.store.apply_tag_filter(&tags);
    }

    let groups = session.store.groups();
    if groups.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }
    for group in groups {
        println!("{}", group.name);
        for profile in group.profiles {
            let tags = if profile.tags().is_empty() {
                String::new()
            } else {
                let list: Vec<&str> = profile.tags().iter().map(String::as_str).collect();
                format!("  [{}]", list.join(", "))
            };
            println!("  {}  {}{tags}", profile.name(), profile.url());
        }
    }
    Ok(())
}

pub fn execute_show(config_dir: &Path, key: &str) -> anyhow::Result<()> {
    let session = open(config_dir)?;
    let parsed: ProfileKey = key.parse()?;
    let Some(profile) = session.store.find(&parsed) else {
        bail!("no profile matches '{key}'");
    };

    println!("Name:         {}", profile.name());
    println!("Group:        {}", profile.group_or_default());
    println!("URL:          {}", profile.url());
    println!("Driver:       {}", profile.driver_name());
    println!("Driver class: {}", profile.driver_class());
    println!("Username:     {}", profile.username());
    println!("Autocommit:   {}", profile.is_autocommit());
    println!("Read-only:    {}", profile.is_read_only());
    if !profile.tags().is_empty() {
        let list: Vec<&str> = profile.tags().iter().map(String::as_str).collect();
        println!("Tags:         {}", list.join(", "));
    }
    if let Some(filter) = profile.schema_filter() {
        println!("Schema filter: {}", filter.expressions().join(", "));
    }
    if let Some(filter) = profile.catalog_filter() {
        println!("Catalog filter: {}", filter.expressions().join(", "));
    }
    Ok(())
}

pub fn execute_add(config_dir: &Path, args: &AddArgs) -> anyhow::Result<()> {
    let mut session = open(config_dir)?;

    let mut profile = ConnectionProfile::new(&args.name);
    profile.set_group(args.group.clone());
    if let Some(url) = &args.url {
        profile.set_url(url);
    }
    if let Some(driver_class) = &args.driver_class {
        profile.set_driver_class(driver_class);
    }
    if let Some(driver_name) = &args.driver_name {
        profile.set_driver_name(driver_name);
    }
    if let Some(username) = &args.username {
        profile.set_username(username);
    }
    profile.set_read_only(args.read_only);
    profile.set_autocommit(args.autocommit);
    for tag in &args.tags {
        profile.add_tag(tag);
    }

    let key = profile.key();
    let location = session.store.add_profile(profile);
    save(&mut session)?;
    println!(
        "Added '{key}' to group '{}' at position {}",
        location.group, location.index
    );
    Ok(())
}

pub fn execute_remove(config_dir: &Path, keys: &[String]) -> anyhow::Result<()> {
    let mut session = open(config_dir)?;
    for key in keys {
        let id = resolve(&session.store, key)?;
        session.store.delete_profile(id);
        println!("Removed '{key}'");
    }
    save(&mut session)
}

pub fn execute_move(config_dir: &Path, keys: &[String], target: &str) -> anyhow::Result<()> {
    let mut session = open(config_dir)?;
    let ids = keys
        .iter()
        .map(|key| resolve(&session.store, key))
        .collect::<anyhow::Result<Vec<ProfileId>>>()?;
    session.store.move_to_group(&ids, target);
    save(&mut session)?;
    println!("Moved {} profile(s) to '{target}'", ids.len());
    Ok(())
}

pub fn execute_copy(config_dir: &Path, keys: &[String], target: &str) -> anyhow::Result<()> {
    let mut session = open(config_dir)?;
    let ids = keys
        .iter()
        .map(|key| resolve(&session.store, key))
        .collect::<anyhow::Result<Vec<ProfileId>>>()?;
    let created = session.store.copy_to_group(&ids, target);
    save(&mut session)?;
    println!("Copied {} profile(s) to '{target}'", created.len());
    Ok(())
}

pub fn execute_remove_group(config_dir: &Path, name: &str) -> anyhow::Result<()> {
    let mut session = open(config_dir)?;
    let before = session.store.len();
    session.store.delete_group(name);
    let removed = before - session.store.len();
    save(&mut session)?;
    println!("Deleted group '{name}' ({removed} profile(s))");
    Ok(())
}

pub fn execute_tag(
    config_dir: &Path,
    key: &str,
    add: &[String],
    remove: &[String],
) -> anyhow::Result<()> {
    let mut session = open(config_dir)?;
    let id = resolve(&session.store, key)?;
    let profile = session
        .store
        .get_mut(id)
        .with_context(|| format!("no profile matches '{key}'"))?;
    for tag in add {
        profile.add_tag(tag);
    }
    for tag in remove {
        profile.remove_tag(tag);
    }
    let tags: Vec<&str> = profile.tags().iter().map(String::as_str).collect();
    let summary = tags.join(", ");
    save(&mut session)?;
    println!("Tags for '{key}': {summary}");
    Ok(())
}
