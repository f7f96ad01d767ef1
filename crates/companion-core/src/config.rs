//! Runtime configuration persisted with the snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr};

use crate::mode::{IndexParse, IndexedMode, parse_index};

/// Which language model backend drives the characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, FromRepr)]
#[repr(u8)]
pub enum ModelMode {
    #[default]
    GeminiApi = 0,
    GemmaLocal = 1,
    OllamaHttp = 2,
}

impl IndexedMode for ModelMode {
    fn from_discriminant(discriminant: u8) -> Option<Self> {
        Self::from_repr(discriminant)
    }

    fn index(self) -> i32 {
        self as i32
    }
}

/// Application toggles and view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub always_on_top: bool,
    /// 0.0 - 1.0
    pub system_volume: f32,
    /// 0.0 - 1.0
    pub alarm_volume: f32,
    pub auto_start_enabled: bool,
    pub screen_capture_module_enabled: bool,
    pub self_awareness_module_enabled: bool,
    pub camera_zoom_level: f32,
    /// Raw [`ModelMode`] index; read it through [`AppConfig::model_mode`].
    pub model_mode: i32,
    #[serde(default, deserialize_with = "crate::snapshot::null_as_default")]
    pub language_code: String,
    /// Saved main-list order as `preset_<id>` / `group_<id>` keys.
    /// See [`crate::display_order`].
    #[serde(
        rename = "presetOrder",
        default,
        deserialize_with = "crate::snapshot::null_as_default"
    )]
    pub display_order: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            always_on_top: false,
            system_volume: 1.0,
            alarm_volume: 1.0,
            auto_start_enabled: false,
            screen_capture_module_enabled: false,
            self_awareness_module_enabled: false,
            camera_zoom_level: 1.0,
            model_mode: ModelMode::default().index(),
            language_code: "en".to_string(),
            display_order: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn model_mode(&self) -> IndexParse<ModelMode> {
        parse_index(self.model_mode)
    }

    pub fn set_model_mode(&mut self, mode: ModelMode) {
        self.model_mode = mode.index();
    }
}

/// Owner of the live configuration.
///
/// In a running application the values live on several runtime objects
/// (window, audio, camera, feature modules). Implementors aggregate them for
/// [`ConfigProvider::export`] and push them back out on
/// [`ConfigProvider::apply`]. The per-value accessors default to reading an
/// export.
pub trait ConfigProvider: Send + Sync {
    fn export(&self) -> AppConfig;

    fn apply(&self, config: AppConfig);

    fn always_on_top(&self) -> bool {
        self.export().always_on_top
    }

    fn auto_start_enabled(&self) -> bool {
        self.export().auto_start_enabled
    }

    fn system_volume(&self) -> f32 {
        self.export().system_volume
    }

    fn alarm_volume(&self) -> f32 {
        self.export().alarm_volume
    }

    fn camera_zoom_level(&self) -> f32 {
        self.export().camera_zoom_level
    }

    fn screen_capture_module_enabled(&self) -> bool {
        self.export().screen_capture_module_enabled
    }

    fn self_awareness_module_enabled(&self) -> bool {
        self.export().self_awareness_module_enabled
    }
}

/// Configuration held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfig {
    config: Arc<RwLock<AppConfig>>,
}

impl InMemoryConfig {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Mutates the live configuration in place.
    pub fn update(&self, f: impl FnOnce(&mut AppConfig)) {
        f(&mut self.config.write().unwrap_or_else(PoisonError::into_inner));
    }
}

impl ConfigProvider for InMemoryConfig {
    fn export(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, config: AppConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }
}
