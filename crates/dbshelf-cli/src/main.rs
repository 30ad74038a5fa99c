//! dbshelf CLI - Command-line interface for managing connection profiles
//!
//! Provides `dbshelf list`, `dbshelf add`, `dbshelf mv`, and other commands
//! over the profile store. Profile arguments use the `{group}/name` key
//! syntax; a bare name matches in any group.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::profiles::{self, AddArgs};
use commands::templates::TemplateCommands;

#[derive(Parser)]
#[command(name = "dbshelf")]
#[command(about = "dbshelf - connection profile manager")]
#[command(version)]
struct Cli {
    /// Configuration directory (defaults to ~/.dbshelf)
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List profiles grouped by their group
    List {
        /// Only show profiles whose name contains this text (case-insensitive)
        #[arg(long, value_name = "TEXT")]
        name_filter: Option<String>,

        /// Only show profiles carrying all of these tags (can repeat)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },
    /// Show a single profile
    Show {
        /// Profile key, e.g. "{Work}/Prod DB" or a bare name
        key: String,
    },
    /// Add a new profile
    Add(AddArgs),
    /// Remove profiles
    Rm {
        /// Profile keys to remove
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Move profiles to another group
    Mv {
        /// Profile keys to move
        #[arg(required = true)]
        keys: Vec<String>,

        /// Target group
        #[arg(long, value_name = "GROUP")]
        to: String,
    },
    /// Copy profiles into another group
    Copy {
        /// Profile keys to copy
        #[arg(required = true)]
        keys: Vec<String>,

        /// Target group
        #[arg(long, value_name = "GROUP")]
        to: String,
    },
    /// Delete a group and every profile in it
    RmGroup {
        /// Group name
        name: String,
    },
    /// Add or remove tags on a profile
    Tag {
        /// Profile key
        key: String,

        /// Tags to add (can repeat)
        #[arg(long = "add", value_name = "TAG")]
        add: Vec<String>,

        /// Tags to remove (can repeat)
        #[arg(long = "remove", value_name = "TAG")]
        remove: Vec<String>,
    },
    /// Manage schema/catalog filter templates
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?
            .join(".dbshelf"),
    };

    match cli.command {
        Commands::List { name_filter, tags } => {
            profiles::execute_list(&config_dir, name_filter.as_deref(), &tags)
        }
        Commands::Show { key } => profiles::execute_show(&config_dir, &key),
        Commands::Add(args) => profiles::execute_add(&config_dir, &args),
        Commands::Rm { keys } => profiles::execute_remove(&config_dir, &keys),
        Commands::Mv { keys, to } => profiles::execute_move(&config_dir, &keys, &to),
        Commands::Copy { keys, to } => profiles::execute_copy(&config_dir, &keys, &to),
        Commands::RmGroup { name } => profiles::execute_remove_group(&config_dir, &name),
        Commands::Tag { key, add, remove } => {
            profiles::execute_tag(&config_dir, &key, &add, &remove)
        }
        Commands::Template { action } => commands::templates::execute(&config_dir, action),
    }
}
