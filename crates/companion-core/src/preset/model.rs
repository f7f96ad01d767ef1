//! PresetRecord snapshot model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr};
use uuid::Uuid;

use super::intimacy;
use crate::mode::{IndexedMode, parse_index};

/// Presence mode of a character preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, FromRepr)]
#[repr(u8)]
pub enum CharacterMode {
    #[default]
    Off = 0,
    Activated = 1,
    Sleep = 2,
}

impl IndexedMode for CharacterMode {
    fn from_discriminant(discriminant: u8) -> Option<Self> {
        Self::from_repr(discriminant)
    }

    fn index(self) -> i32 {
        self as i32
    }
}

/// A character preset as persisted in the snapshot.
///
/// `group_id` is a weak reference: it names a [`crate::group::GroupRecord`]
/// by id and is resolved against the live group list after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRecord {
    pub id: String,
    #[serde(rename = "groupID")]
    pub group_id: Option<String>,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub on_message: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub sleep_message: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub off_message: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub personality: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub setting: String,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub iq: String,
    /// UI label `"1"`..`"10"`, derived from `internal_intimacy_score`.
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub intimacy: String,
    pub internal_intimacy_score: f32,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub dialogue_examples: Vec<String>,
    pub sitting_offset_y: f32,
    /// PNG bytes, base64 encoded. Empty when no picture is set.
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub character_image_base64: String,
    /// Path to the external 3D model file, if one was imported.
    pub vrm_file_path: Option<String>,
    pub creation_time: DateTime<Utc>,
    pub last_interaction_time: DateTime<Utc>,
    /// Raw [`CharacterMode`] index; read it through [`PresetRecord::mode`].
    pub current_mode: i32,
    pub is_auto_move_enabled: bool,
}

impl PresetRecord {
    /// Creates a preset with a fresh `preset_<uuid>` id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(format!("preset_{}", Uuid::new_v4()), name)
    }

    /// Creates a preset with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            group_id: None,
            name: name.into(),
            on_message: String::new(),
            sleep_message: String::new(),
            off_message: String::new(),
            gender: String::new(),
            personality: String::new(),
            setting: String::new(),
            iq: String::new(),
            intimacy: intimacy::label_for_score(0.0).to_string(),
            internal_intimacy_score: 0.0,
            dialogue_examples: Vec::new(),
            sitting_offset_y: 0.0,
            character_image_base64: String::new(),
            vrm_file_path: None,
            creation_time: now,
            last_interaction_time: now,
            current_mode: CharacterMode::Off.index(),
            is_auto_move_enabled: false,
        }
    }

    /// Current mode; an undefined index reads as [`CharacterMode::Off`].
    pub fn mode(&self) -> CharacterMode {
        parse_index(self.current_mode).unwrap_or(CharacterMode::Off)
    }

    pub fn set_mode(&mut self, mode: CharacterMode) {
        self.current_mode = mode.index();
    }

    /// Clamps the score and re-derives the label from it.
    pub fn normalize_intimacy(&mut self) {
        self.internal_intimacy_score = intimacy::clamp_score(self.internal_intimacy_score);
        self.intimacy = intimacy::label_for_score(self.internal_intimacy_score).to_string();
    }

    /// Adds `delta` to the score, keeping the label in sync.
    pub fn adjust_intimacy(&mut self, delta: f32) {
        self.internal_intimacy_score += delta;
        self.normalize_intimacy();
    }

    /// Records an interaction at `at`.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_interaction_time = at;
    }
}
