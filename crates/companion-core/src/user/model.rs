//! UserProfile snapshot model.

use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr};

use crate::mode::{IndexedMode, parse_index};

/// The user's presence mode. Selects which status message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, FromRepr)]
#[repr(u8)]
pub enum UserMode {
    /// Active.
    #[default]
    On = 0,
    /// Away / do-not-disturb.
    Sleep = 1,
    /// AI features disabled.
    Off = 2,
}

impl UserMode {
    /// Cycles On → Sleep → Off → On.
    pub fn next(self) -> Self {
        match self {
            UserMode::On => UserMode::Sleep,
            UserMode::Sleep => UserMode::Off,
            UserMode::Off => UserMode::On,
        }
    }
}

impl IndexedMode for UserMode {
    fn from_discriminant(discriminant: u8) -> Option<Self> {
        Self::from_repr(discriminant)
    }

    fn index(self) -> i32 {
        self as i32
    }
}

/// User profile as persisted in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub user_name: String,
    /// Status message shown in [`UserMode::On`].
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub on_message: String,
    /// Status message shown in [`UserMode::Sleep`].
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub sleep_message: String,
    /// Status message shown in [`UserMode::Off`].
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub off_message: String,
    /// PNG bytes, base64 encoded. Empty when no picture is set.
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub profile_image_base64: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub user_prompt: String,
    /// Raw [`UserMode`] index; read it through [`UserProfile::mode`].
    pub condition_index: i32,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub api_key: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_name: "Name".to_string(),
            on_message: "Message".to_string(),
            sleep_message: "SleepMessage".to_string(),
            off_message: "OffMessage".to_string(),
            profile_image_base64: String::new(),
            user_prompt: String::new(),
            condition_index: UserMode::On.index(),
            api_key: String::new(),
        }
    }
}

impl UserProfile {
    /// Current mode; an undefined index reads as [`UserMode::On`].
    pub fn mode(&self) -> UserMode {
        parse_index(self.condition_index).unwrap_or(UserMode::On)
    }

    pub fn set_mode(&mut self, mode: UserMode) {
        self.condition_index = mode.index();
    }

    /// The status message for the current mode.
    pub fn status_message(&self) -> &str {
        match self.mode() {
            UserMode::On => &self.on_message,
            UserMode::Sleep => &self.sleep_message,
            UserMode::Off => &self.off_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_cycles() {
        assert_eq!(UserMode::On.next(), UserMode::Sleep);
        assert_eq!(UserMode::Sleep.next(), UserMode::Off);
        assert_eq!(UserMode::Off.next(), UserMode::On);
    }

    #[test]
    fn test_status_message_follows_mode() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.status_message(), "Message");
        profile.set_mode(UserMode::Sleep);
        assert_eq!(profile.condition_index, 1);
        assert_eq!(profile.status_message(), "SleepMessage");
    }

    #[test]
    fn test_undefined_index_reads_as_on() {
        let profile = UserProfile {
            condition_index: 7,
            ..UserProfile::default()
        };
        assert_eq!(profile.mode(), UserMode::On);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert!(json.get("userName").is_some());
        assert!(json.get("profileImageBase64").is_some());
        assert!(json.get("conditionIndex").is_some());
        assert!(json.get("apiKey").is_some());
    }

    #[test]
    fn test_null_and_missing_fields_read_as_defaults() {
        let json = r#"{ "userName": "Mina", "apiKey": null, "userPrompt": null }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user_name, "Mina");
        assert!(profile.api_key.is_empty());
        assert!(profile.user_prompt.is_empty());
        assert_eq!(profile.on_message, "Message");
        assert_eq!(profile.mode(), UserMode::On);
    }
}
