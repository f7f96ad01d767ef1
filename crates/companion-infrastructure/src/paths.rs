//! Unified path management for companion files.
//!
//! Settings live under the per-user config directory and the save file under
//! the per-user local data directory, both resolved through the `dirs` crate
//! so every platform gets its conventional location.

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform reports no per-user directory of this kind.
    DirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

/// Default directory name under the platform config and data directories.
pub const DEFAULT_APP_DIR_NAME: &str = "companion";

/// Default save file name.
pub const DEFAULT_SAVE_FILE_NAME: &str = "appSave.cat";

const SETTINGS_FILE_NAME: &str = "persistence.toml";

/// Path resolution for one application directory name.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/companion/         # Config directory
/// └── persistence.toml         # Persistence settings
///
/// ~/.local/share/companion/    # Data directory
/// └── appSave.cat              # Encrypted snapshot
/// ```
///
/// A data directory override replaces the platform data directory entirely,
/// which tests and portable installs use.
#[derive(Debug, Clone)]
pub struct CompanionPaths {
    app_dir_name: String,
    data_dir_override: Option<PathBuf>,
}

impl Default for CompanionPaths {
    fn default() -> Self {
        Self::new(DEFAULT_APP_DIR_NAME)
    }
}

impl CompanionPaths {
    pub fn new(app_dir_name: impl Into<String>) -> Self {
        Self {
            app_dir_name: app_dir_name.into(),
            data_dir_override: None,
        }
    }

    /// Uses `dir` as the data directory instead of the platform one.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir_override = Some(dir.into());
        self
    }

    pub fn app_dir_name(&self) -> &str {
        &self.app_dir_name
    }

    /// Returns the companion configuration directory (e.g., `~/.config/companion/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(&self.app_dir_name))
            .ok_or(PathError::DirNotFound("config"))
    }

    /// Returns the per-user application data directory
    /// (e.g., `~/.local/share/companion/`), or the override when set.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join(&self.app_dir_name))
            .ok_or(PathError::DirNotFound("data"))
    }

    /// Returns the path to the persistence settings file.
    pub fn settings_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Returns the path to the save file named `file_name` in the data directory.
    pub fn save_file(&self, file_name: &str) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(file_name))
    }

    /// Creates the data directory if it does not exist.
    pub fn ensure_data_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self
            .data_dir()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        ensure_dir(&dir)?;
        Ok(dir)
    }
}

fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
