//! Filter template CLI commands
//!
//! Handles: dbshelf template list/add/rm

use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

use dbshelf_core::profile::FilterTemplateStore;
use dbshelf_core::storage::SettingsFile;

/// Filter template commands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List saved filter templates
    List,
    /// Add a filter template
    Add {
        /// Template name
        name: String,

        /// Comma- or newline-separated match expressions, e.g. "pg_%, sys"
        definition: String,
    },
    /// Remove a filter template
    Rm {
        /// Template name
        name: String,
    },
}

pub fn execute(config_dir: &Path, cmd: TemplateCommands) -> anyhow::Result<()> {
    let mut settings = SettingsFile::new(config_dir);
    settings
        .load()
        .with_context(|| format!("failed to load {}", settings.path().display()))?;
    let mut templates = FilterTemplateStore::new();

    match cmd {
        TemplateCommands::List => {
            let list = templates.templates(&settings);
            if list.is_empty() {
                println!("No filter templates saved.");
                return Ok(());
            }
            for template in list {
                let kind = if template.filter.is_inclusion() {
                    "include"
                } else {
                    "exclude"
                };
                println!(
                    "{}  ({kind}: {})",
                    template.name,
                    template.filter.expressions().join(", ")
                );
            }
        }
        TemplateCommands::Add { name, definition } => {
            templates.add(&settings, &name, &definition);
            templates.save(&mut settings);
            settings
                .save()
                .with_context(|| format!("failed to save {}", settings.path().display()))?;
            println!("Added template '{name}'");
        }
        TemplateCommands::Rm { name } => {
            if templates.remove(&settings, &name) {
                templates.save(&mut settings);
                settings
                    .save()
                    .with_context(|| format!("failed to save {}", settings.path().display()))?;
                println!("Removed template '{name}'");
            } else {
                println!("No template named '{name}'");
            }
        }
    }
    Ok(())
}
