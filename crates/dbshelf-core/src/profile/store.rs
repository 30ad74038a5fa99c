//! In-memory profile store with grouping and reversible filtering
//!
//! The store owns the working copy of all profiles during an edit session.
//! Profiles live in one of two lists: `visible` or `filtered_out`. Filters
//! never delete anything; they move profiles between the two lists, and the
//! union of both is always the full working set.
//!
//! The group hierarchy is a projection rebuilt from `visible` on demand,
//! never maintained incrementally, so there is no partially-updated tree to
//! get out of sync. The projection carries no rendering concerns; a view
//! layer builds its own tree from it.
//!
//! The API takes `&mut self` and performs no internal locking. Embedders
//! without a single-threaded event loop should wrap the store in a mutex;
//! profile counts are small enough that nothing finer is worth it.

use std::collections::BTreeSet;

use super::key::ProfileKey;
use super::types::{ConnectionProfile, ProfileId};
use crate::storage::{ProfilePersistence, StorageError};

/// Position of a profile in the rendered hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLocation {
    /// Group the profile belongs to
    pub group: String,
    /// Index within the group's sorted profile list
    pub index: usize,
}

/// One group of the derived hierarchy: a name and its member profiles
#[derive(Debug)]
pub struct GroupNode<'a> {
    /// Group name
    pub name: String,
    /// Members, sorted by profile name
    pub profiles: Vec<&'a ConnectionProfile>,
}

/// The authoritative in-memory profile collection for one edit session
#[derive(Debug, Default)]
pub struct ProfileStore {
    visible: Vec<ConnectionProfile>,
    filtered_out: Vec<ConnectionProfile>,
}

impl ProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a working copy of the supplied profiles
    ///
    /// Mutations inside the store never touch the caller's originals; the
    /// edited set only flows back through [`Self::apply_profiles`]. Any
    /// active filter is discarded.
    pub fn load(&mut self, initial: &[ConnectionProfile]) {
        tracing::debug!(count = initial.len(), "loading profiles into store");
        self.visible = initial.to_vec();
        self.filtered_out.clear();
    }

    /// All profiles currently visible (not filtered out)
    #[must_use]
    pub fn visible(&self) -> &[ConnectionProfile] {
        &self.visible
    }

    /// Number of profiles in the full working set
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len() + self.filtered_out.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.filtered_out.is_empty()
    }

    /// Rebuild the group hierarchy from the visible profiles
    ///
    /// Groups are ordered by name case-insensitively; members are sorted by
    /// profile name (case-sensitive). Every visible profile appears in
    /// exactly one group.
    #[must_use]
    pub fn groups(&self) -> Vec<GroupNode<'_>> {
        let mut nodes: Vec<GroupNode<'_>> = Vec::new();
        for profile in &self.visible {
            let group = profile.group_or_default();
            match nodes.iter_mut().find(|n| n.name == group) {
                Some(node) => node.profiles.push(profile),
                None => nodes.push(GroupNode {
                    name: group.to_string(),
                    profiles: vec![profile],
                }),
            }
        }
        for node in &mut nodes {
            node.profiles.sort_by(|a, b| a.name().cmp(b.name()));
        }
        nodes.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        nodes
    }

    /// Append a profile and report where it landed
    ///
    /// The profile's group need not exist beforehand; an absent group comes
    /// into being with its first member.
    pub fn add_profile(&mut self, profile: ConnectionProfile) -> ProfileLocation {
        let id = profile.id();
        let group = profile.group_or_default().to_string();
        tracing::debug!(name = %profile.name(), group = %group, "adding profile");
        self.visible.push(profile);

        let mut members: Vec<&ConnectionProfile> = self
            .visible
            .iter()
            .filter(|p| p.group_or_default() == group)
            .collect();
        members.sort_by(|a, b| a.name().cmp(b.name()));
        let index = members.iter().position(|p| p.id() == id).unwrap_or(0);
        ProfileLocation { group, index }
    }

    /// Remove a profile from the working set; unknown ids are a no-op
    ///
    /// This only removes the profile from the model. Dropping it from
    /// durable storage happens when the session is saved.
    pub fn delete_profile(&mut self, id: ProfileId) {
        self.visible.retain(|p| p.id() != id);
        self.filtered_out.retain(|p| p.id() != id);
    }

    /// Move profiles into another group
    ///
    /// Each profile is re-assigned in a single step, so it is never left
    /// between groups. An empty id list or a blank target is a no-op.
    pub fn move_to_group(&mut self, ids: &[ProfileId], target: &str) {
        let target = target.trim();
        if target.is_empty() || ids.is_empty() {
            return;
        }
        tracing::debug!(count = ids.len(), target = %target, "moving profiles to group");
        for id in ids {
            if let Some(profile) = self.get_mut(*id) {
                profile.set_group(Some(target.to_string()));
            }
        }
    }

    /// Copy profiles into another group, leaving the originals untouched
    ///
    /// Each copy gets a fresh identity, so the same name may exist in both
    /// groups. Returns the ids of the created copies.
    pub fn copy_to_group(&mut self, ids: &[ProfileId], target: &str) -> Vec<ProfileId> {
        let target = target.trim();
        if target.is_empty() || ids.is_empty() {
            return Vec::new();
        }
        let mut created = Vec::new();
        for id in ids {
            let Some(source) = self.get(*id) else {
                continue;
            };
            let mut copy = source.create_copy();
            copy.set_group(Some(target.to_string()));
            created.push(copy.id());
            self.visible.push(copy);
        }
        tracing::debug!(count = created.len(), target = %target, "copied profiles to group");
        created
    }

    /// Delete a whole group and every profile in it
    ///
    /// Unlike filtering, this is a genuine delete: members are removed from
    /// both the visible and the filtered-out list. An unknown group is a
    /// no-op.
    pub fn delete_group(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let before = self.len();
        self.visible.retain(|p| p.group_or_default() != name);
        self.filtered_out.retain(|p| p.group_or_default() != name);
        tracing::debug!(group = %name, removed = before - self.len(), "deleted group");
    }

    /// Hide every profile whose name does not contain `text` (case-insensitive)
    ///
    /// Each call recomputes from the full working set, never from the
    /// already-filtered result, so typing fewer characters widens the
    /// selection again. Blank input clears the filter.
    pub fn apply_name_filter(&mut self, text: &str) {
        self.reset_filter();
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return;
        }
        let all = std::mem::take(&mut self.visible);
        let (keep, hide): (Vec<_>, Vec<_>) = all
            .into_iter()
            .partition(|p| p.name().to_lowercase().contains(&needle));
        self.visible = keep;
        self.filtered_out = hide;
    }

    /// Hide every profile whose tag set is not a superset of `tags`
    ///
    /// All requested tags must be present on a profile for it to stay
    /// visible; extra tags are fine. Same reset-then-reapply behavior as
    /// [`Self::apply_name_filter`]; an empty tag set clears the filter.
    pub fn apply_tag_filter(&mut self, tags: &BTreeSet<String>) {
        self.reset_filter();
        if tags.is_empty() {
            return;
        }
        let all = std::mem::take(&mut self.visible);
        let (keep, hide): (Vec<_>, Vec<_>) = all
            .into_iter()
            .partition(|p| tags.iter().all(|t| p.tags().contains(t)));
        self.visible = keep;
        self.filtered_out = hide;
    }

    /// Bring every filtered-out profile back; content is untouched
    pub fn reset_filter(&mut self) {
        self.visible.append(&mut self.filtered_out);
    }

    /// Resolve a key to the profile's current position in the hierarchy
    ///
    /// A key with a group resolves against that group only (exact,
    /// case-sensitive); a key without one matches the name in whichever
    /// group holds it first. Returns `None` when the group or the profile
    /// is missing; never errors.
    #[must_use]
    pub fn get_path(&self, key: &ProfileKey) -> Option<ProfileLocation> {
        let groups = self.groups();
        match key.group() {
            Some(group) if !group.trim().is_empty() => {
                let node = groups.iter().find(|n| n.name == group)?;
                let index = node.profiles.iter().position(|p| p.key() == *key)?;
                Some(ProfileLocation {
                    group: node.name.clone(),
                    index,
                })
            }
            _ => groups.iter().find_map(|node| {
                node.profiles
                    .iter()
                    .position(|p| p.key() == *key)
                    .map(|index| ProfileLocation {
                        group: node.name.clone(),
                        index,
                    })
            }),
        }
    }

    /// First profile matching the key, searching visible then filtered-out
    #[must_use]
    pub fn find(&self, key: &ProfileKey) -> Option<&ConnectionProfile> {
        self.visible
            .iter()
            .find(|p| p.key() == *key)
            .or_else(|| self.filtered_out.iter().find(|p| p.key() == *key))
    }

    #[must_use]
    pub fn get(&self, id: ProfileId) -> Option<&ConnectionProfile> {
        self.visible
            .iter()
            .find(|p| p.id() == id)
            .or_else(|| self.filtered_out.iter().find(|p| p.id() == id))
    }

    pub fn get_mut(&mut self, id: ProfileId) -> Option<&mut ConnectionProfile> {
        if let Some(pos) = self.visible.iter().position(|p| p.id() == id) {
            return self.visible.get_mut(pos);
        }
        if let Some(pos) = self.filtered_out.iter().position(|p| p.id() == id) {
            return self.filtered_out.get_mut(pos);
        }
        None
    }

    /// Whether any profile in the working set has unsaved changes
    #[must_use]
    pub fn profiles_modified(&self) -> bool {
        self.iter_all().any(ConnectionProfile::is_changed)
    }

    /// Whether any profile was moved to another group
    #[must_use]
    pub fn groups_changed(&self) -> bool {
        self.iter_all().any(ConnectionProfile::is_group_changed)
    }

    /// Hand the full working set to the persistence collaborator
    ///
    /// Replaces the collaborator's authoritative set without writing it
    /// through to durable storage.
    pub fn apply_profiles(&self, persistence: &mut dyn ProfilePersistence) {
        let all: Vec<ConnectionProfile> = self.iter_all().cloned().collect();
        persistence.apply_profiles(&all);
    }

    /// Apply the working set, write it through, and clear all dirty flags
    ///
    /// # Errors
    /// Returns an error when the collaborator fails to write to durable
    /// storage; dirty flags are only cleared after a successful write.
    pub fn save_profiles(
        &mut self,
        persistence: &mut dyn ProfilePersistence,
    ) -> Result<(), StorageError> {
        self.apply_profiles(persistence);
        persistence.save_profiles()?;
        for profile in self
            .visible
            .iter_mut()
            .chain(self.filtered_out.iter_mut())
        {
            profile.clear_dirty();
        }
        tracing::debug!(count = self.len(), "saved profiles");
        Ok(())
    }

    fn iter_all(&self) -> impl Iterator<Item = &ConnectionProfile> {
        self.visible.iter().chain(self.filtered_out.iter())
    }
}
