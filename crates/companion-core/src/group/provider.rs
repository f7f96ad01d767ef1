//! Group collection collaborator.

use std::sync::{Arc, PoisonError, RwLock};

use super::model::GroupRecord;

/// Owner of the live group list.
pub trait GroupProvider: Send + Sync {
    /// Returns the exportable groups in display order.
    fn export(&self) -> Vec<GroupRecord>;

    /// Replaces the live group list with `groups`.
    fn apply(&self, groups: Vec<GroupRecord>);
}

/// Group list kept in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupCollection {
    groups: Arc<RwLock<Vec<GroupRecord>>>,
}

impl InMemoryGroupCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group_id: &str) -> Option<GroupRecord> {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|g| g.group_id == group_id)
            .cloned()
    }

    /// Adds or replaces a group by id.
    pub fn upsert(&self, group: GroupRecord) {
        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        match groups.iter_mut().find(|g| g.group_id == group.group_id) {
            Some(existing) => *existing = group,
            None => groups.push(group),
        }
    }
}

impl GroupProvider for InMemoryGroupCollection {
    fn export(&self) -> Vec<GroupRecord> {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, groups: Vec<GroupRecord>) {
        *self.groups.write().unwrap_or_else(PoisonError::into_inner) = groups;
    }
}
