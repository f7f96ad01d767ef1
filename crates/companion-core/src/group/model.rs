//! GroupRecord snapshot model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of character presets as persisted in the snapshot.
///
/// `member_preset_ids` are weak references resolved against the live preset
/// collection after loading; the group owns none of its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    #[serde(rename = "groupID")]
    pub group_id: String,
    #[serde(
        rename = "groupName",
        default,
        deserialize_with = "crate::snapshot::null_as_default"
    )]
    pub group_name: String,
    /// Group icon, PNG bytes base64 encoded. Empty when unset.
    #[serde(
        rename = "groupSymbol_Base64",
        default,
        deserialize_with = "crate::snapshot::null_as_default"
    )]
    pub group_symbol_base64: String,
    #[serde(
        rename = "memberPresetIDs",
        default,
        deserialize_with = "crate::snapshot::null_as_default"
    )]
    pub member_preset_ids: Vec<String>,
    #[serde(rename = "lastInteractionTime")]
    pub last_interaction_time: DateTime<Utc>,
    /// Unseen-message marker for the current session. Never written; older
    /// saves that carry it are accepted and the value is discarded on load.
    #[serde(rename = "hasNotification", default, skip_serializing)]
    pub has_notification: bool,
}

impl GroupRecord {
    /// Creates an empty group with a fresh `group_<uuid>` id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(format!("group_{}", Uuid::new_v4()), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group_id: id.into(),
            group_name: name.into(),
            group_symbol_base64: String::new(),
            member_preset_ids: Vec::new(),
            last_interaction_time: Utc::now(),
            has_notification: false,
        }
    }

    pub fn has_member(&self, preset_id: &str) -> bool {
        self.member_preset_ids.iter().any(|id| id == preset_id)
    }

    /// Adds a member id unless already present. Returns whether it was added.
    pub fn add_member(&mut self, preset_id: impl Into<String>) -> bool {
        let preset_id = preset_id.into();
        if self.has_member(&preset_id) {
            return false;
        }
        self.member_preset_ids.push(preset_id);
        true
    }

    /// Removes a member id. Returns whether it was present.
    pub fn remove_member(&mut self, preset_id: &str) -> bool {
        let before = self.member_preset_ids.len();
        self.member_preset_ids.retain(|id| id != preset_id);
        before != self.member_preset_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_are_unique() {
        let mut group = GroupRecord::with_id("g1", "Friends");
        assert!(group.add_member("p1"));
        assert!(!group.add_member("p1"));
        assert_eq!(group.member_preset_ids, vec!["p1"]);
        assert!(group.remove_member("p1"));
        assert!(!group.remove_member("p1"));
    }

    #[test]
    fn test_notification_flag_is_not_written() {
        let mut group = GroupRecord::with_id("g1", "Friends");
        group.has_notification = true;
        let json = serde_json::to_value(&group).unwrap();
        assert!(json.get("hasNotification").is_none());
        assert!(json.get("groupSymbol_Base64").is_some());
        assert!(json.get("memberPresetIDs").is_some());
    }

    #[test]
    fn test_notification_flag_accepted_on_read() {
        let json = r#"{
            "groupID": "g1",
            "groupName": "Friends",
            "groupSymbol_Base64": "",
            "memberPresetIDs": [],
            "lastInteractionTime": "2025-01-02T03:04:05Z",
            "hasNotification": true
        }"#;
        let group: GroupRecord = serde_json::from_str(json).unwrap();
        assert_eq!(group.group_id, "g1");
        assert!(group.has_notification);
    }

    #[test]
    fn test_null_members_read_as_empty() {
        let json = r#"{
            "groupID": "g1",
            "groupName": null,
            "memberPresetIDs": null,
            "lastInteractionTime": "2025-01-02T03:04:05Z"
        }"#;
        let group: GroupRecord = serde_json::from_str(json).unwrap();
        assert!(group.group_name.is_empty());
        assert!(group.group_symbol_base64.is_empty());
        assert!(group.member_preset_ids.is_empty());
    }
}
