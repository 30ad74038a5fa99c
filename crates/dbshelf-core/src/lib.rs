//! dbshelf Core - Connection profile engine and storage
//!
//! This crate provides the profile data model, the grouped/filterable
//! in-memory profile store, filter templates, and file-backed persistence.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod profile;
pub mod storage;

pub use profile::{ConnectionProfile, ProfileKey, ProfileStore};
pub use storage::{ProfileFile, SecretStore, SettingsFile};
