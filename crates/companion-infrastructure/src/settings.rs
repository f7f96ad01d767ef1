//! Persistence settings file (`persistence.toml`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::{CompanionPaths, DEFAULT_APP_DIR_NAME, DEFAULT_SAVE_FILE_NAME, PathError};
use crate::storage::{AtomicFileError, TomlFile};

/// Environment variable the host launcher publishes the platform user id in.
pub const DEFAULT_PLATFORM_ENV_VAR: &str = "COMPANION_PLATFORM_USER_ID";

pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum SettingsFileError {
    #[error("settings path unavailable: {0}")]
    Path(#[from] PathError),

    #[error("settings file error: {0}")]
    Storage(#[from] AtomicFileError),
}

/// Where the identity secret comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum IdentitySource {
    /// Numeric platform user id read from an environment variable.
    Platform {
        #[serde(default = "default_env_var")]
        env_var: String,
    },
    /// The fixed debug secret used when no platform session exists.
    Debug,
    /// An explicitly configured secret.
    Fixed { secret: String },
}

impl Default for IdentitySource {
    fn default() -> Self {
        IdentitySource::Platform {
            env_var: default_env_var(),
        }
    }
}

fn default_env_var() -> String {
    DEFAULT_PLATFORM_ENV_VAR.to_string()
}

/// Settings for locating and protecting the save file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    pub app_dir_name: String,
    pub save_file_name: String,
    /// Replaces the platform data directory when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<PathBuf>,
    pub autosave_interval_secs: u64,
    pub identity: IdentitySource,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            app_dir_name: DEFAULT_APP_DIR_NAME.to_string(),
            save_file_name: DEFAULT_SAVE_FILE_NAME.to_string(),
            save_dir: None,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            identity: IdentitySource::default(),
        }
    }
}

impl PersistenceSettings {
    /// Loads settings from `path`, falling back to defaults when the file is
    /// missing or empty.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsFileError> {
        let file = TomlFile::<Self>::new(path.to_path_buf());
        match file.load()? {
            Some(settings) => {
                tracing::debug!("[PersistenceSettings] Loaded {}", path.display());
                Ok(settings)
            }
            None => {
                tracing::debug!(
                    "[PersistenceSettings] No settings at {}, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Loads from the default location under the platform config directory.
    pub fn load_default_location() -> Result<Self, SettingsFileError> {
        let path = CompanionPaths::default().settings_file()?;
        Self::load_or_default(&path)
    }

    /// Writes the settings atomically.
    pub fn save(&self, path: &Path) -> Result<(), SettingsFileError> {
        TomlFile::<Self>::new(path.to_path_buf()).save(self)?;
        tracing::info!("[PersistenceSettings] Saved {}", path.display());
        Ok(())
    }

    /// Autosave interval. Never shorter than one second.
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs.max(1))
    }

    /// Path resolver honoring `app_dir_name` and `save_dir`.
    pub fn paths(&self) -> CompanionPaths {
        let paths = CompanionPaths::new(self.app_dir_name.clone());
        match &self.save_dir {
            Some(dir) => paths.with_data_dir(dir),
            None => paths,
        }
    }

    pub fn save_file_path(&self) -> Result<PathBuf, PathError> {
        self.paths().save_file(&self.save_file_name)
    }
}
