//! Group registry with case-insensitive name uniqueness.
//!
//! The registry only owns the group list. Cascading a deletion onto pins is
//! done by the engine, which commits the registry change and the cleared pin
//! references as one history step.

#[cfg(test)]
#[path = "groups_test.rs"]
mod groups_test;

use tracing::warn;
use uuid::Uuid;

use crate::doc::{Group, GroupId, RetiredGroup};
use crate::error::EditError;

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Ordered set of groups. Names are non-empty and unique ignoring case;
/// stored names keep the casing they were entered with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl GroupRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from loaded records, dropping any that break the
    /// registry invariants (empty name, duplicate id, duplicate name).
    #[must_use]
    pub fn from_groups(groups: Vec<Group>) -> Self {
        let mut registry = Self::new();
        for group in groups {
            let name = group.name.trim();
            if name.is_empty() || registry.contains(&group.id) || registry.name_taken(name, None) {
                warn!(id = %group.id, name = %group.name, "dropping invalid group record");
                continue;
            }
            registry.groups.push(Group { id: group.id, name: name.to_owned() });
        }
        registry
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn get(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &GroupId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a group by name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Group> {
        let name = name.trim();
        self.groups.iter().find(|g| same_name(&g.name, name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether `name` collides with any group other than `except`.
    #[must_use]
    pub fn name_taken(&self, name: &str, except: Option<&GroupId>) -> bool {
        self.groups
            .iter()
            .any(|g| Some(&g.id) != except && same_name(&g.name, name))
    }

    fn validate_name(&self, name: &str, except: Option<&GroupId>) -> Result<String, EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyGroupName);
        }
        if self.name_taken(name, except) {
            return Err(EditError::DuplicateGroupName(name.to_owned()));
        }
        Ok(name.to_owned())
    }

    /// Add a group named `name` (trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyGroupName`] or [`EditError::DuplicateGroupName`].
    pub fn create(&mut self, name: &str) -> Result<&Group, EditError> {
        let name = self.validate_name(name, None)?;
        let idx = self.groups.len();
        self.groups.push(Group { id: Uuid::new_v4(), name });
        Ok(&self.groups[idx])
    }

    /// Rename group `id`. Re-entering its own name in another casing is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GroupNotFound`], [`EditError::EmptyGroupName`] or
    /// [`EditError::DuplicateGroupName`].
    pub fn rename(&mut self, id: &GroupId, name: &str) -> Result<(), EditError> {
        if !self.contains(id) {
            return Err(EditError::GroupNotFound(*id));
        }
        let name = self.validate_name(name, Some(id))?;
        if let Some(group) = self.groups.iter_mut().find(|g| g.id == *id) {
            group.name = name;
        }
        Ok(())
    }

    /// Remove group `id`, returning it with its former position.
    pub fn remove(&mut self, id: &GroupId) -> Option<RetiredGroup> {
        let index = self.groups.iter().position(|g| g.id == *id)?;
        let group = self.groups.remove(index);
        Some(RetiredGroup { index, group })
    }

    /// Put a previously removed group back at its old position.
    ///
    /// If a group created since then has taken the name, the restored group
    /// gets the first free `"name (n)"` variant. Restoring an id that is
    /// already present does nothing.
    pub fn restore(&mut self, retired: &RetiredGroup) {
        if self.contains(&retired.group.id) {
            return;
        }
        let mut name = retired.group.name.clone();
        let mut n = 2;
        while self.name_taken(&name, None) {
            name = format!("{} ({n})", retired.group.name);
            n += 1;
        }
        let index = retired.index.min(self.groups.len());
        self.groups.insert(index, Group { id: retired.group.id, name });
    }
}
