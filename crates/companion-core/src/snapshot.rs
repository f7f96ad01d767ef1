//! The unit of persistence.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::AppConfig;
use crate::group::GroupRecord;
use crate::preset::PresetRecord;
use crate::user::UserProfile;

/// Complete exportable application state at one instant.
///
/// Built fresh for every save and discarded after encryption; a loaded
/// snapshot is taken apart and handed to the owning collaborators. Save and
/// load are all-or-nothing over this whole structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppSnapshot {
    #[serde(rename = "userData")]
    pub user: UserProfile,
    pub presets: Vec<PresetRecord>,
    pub groups: Vec<GroupRecord>,
    pub config: AppConfig,
}

impl AppSnapshot {
    pub fn new(
        user: UserProfile,
        presets: Vec<PresetRecord>,
        groups: Vec<GroupRecord>,
        config: AppConfig,
    ) -> Self {
        Self {
            user,
            presets,
            groups,
            config,
        }
    }

    /// Names the first float field holding NaN or an infinity.
    ///
    /// JSON has no encoding for those values and `serde_json` writes them as
    /// `null`, which would not read back as a number.
    pub fn non_finite_field(&self) -> Option<String> {
        let config = [
            ("config.systemVolume", self.config.system_volume),
            ("config.alarmVolume", self.config.alarm_volume),
            ("config.cameraZoomLevel", self.config.camera_zoom_level),
        ];
        if let Some((name, _)) = config.iter().find(|(_, v)| !v.is_finite()) {
            return Some(name.to_string());
        }
        self.presets.iter().find_map(|preset| {
            if !preset.internal_intimacy_score.is_finite() {
                Some(format!("presets[{}].internalIntimacyScore", preset.id))
            } else if !preset.sitting_offset_y.is_finite() {
                Some(format!("presets[{}].sittingOffsetY", preset.id))
            } else {
                None
            }
        })
    }
}

/// Reads an explicit `null` as the type's default.
///
/// Pair with `#[serde(default)]` so an absent field reads the same way. Save
/// files written by older builds carry `null` for unset strings and lists.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_wire_names() {
        let json = serde_json::to_value(AppSnapshot::default()).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 4);
        for key in ["userData", "presets", "groups", "config"] {
            assert!(keys.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn test_missing_list_is_rejected() {
        let mut json = serde_json::to_value(AppSnapshot::default()).unwrap();
        json.as_object_mut().unwrap().remove("presets");
        assert!(serde_json::from_value::<AppSnapshot>(json).is_err());
    }

    #[test]
    fn test_non_finite_field_is_named() {
        let mut snapshot = AppSnapshot::default();
        assert_eq!(snapshot.non_finite_field(), None);

        snapshot.config.camera_zoom_level = f32::NAN;
        assert_eq!(
            snapshot.non_finite_field().as_deref(),
            Some("config.cameraZoomLevel")
        );

        snapshot.config.camera_zoom_level = 1.0;
        let mut preset = PresetRecord::with_id("p1", "Alex");
        preset.sitting_offset_y = f32::NEG_INFINITY;
        snapshot.presets.push(preset);
        assert_eq!(
            snapshot.non_finite_field().as_deref(),
            Some("presets[p1].sittingOffsetY")
        );
    }
}
