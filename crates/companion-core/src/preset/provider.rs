//! Preset collection collaborator.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use super::model::PresetRecord;
use crate::error::{CompanionError, Result};

/// Owner of the live preset collection.
///
/// Identifier uniqueness is enforced by the implementor, not by the
/// persistence core.
pub trait PresetProvider: Send + Sync {
    /// Returns the exportable presets in display order.
    fn export(&self) -> Vec<PresetRecord>;

    /// Replaces the live collection with `presets`.
    fn apply(&self, presets: Vec<PresetRecord>);

    /// Looks a preset up by id.
    fn find_by_id(&self, id: &str) -> Option<PresetRecord>;

    /// Sets the weak group reference of preset `preset_id`.
    ///
    /// Returns `false` when no such preset exists.
    fn set_group_ref(&self, preset_id: &str, group_id: Option<String>) -> bool;
}

/// Preset collection kept in memory, ordered as inserted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPresetCollection {
    presets: Arc<RwLock<Vec<PresetRecord>>>,
}

impl InMemoryPresetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a preset, rejecting a duplicate id.
    pub fn insert(&self, preset: PresetRecord) -> Result<()> {
        let mut presets = self.presets.write().unwrap_or_else(PoisonError::into_inner);
        if presets.iter().any(|p| p.id == preset.id) {
            return Err(CompanionError::invalid(format!(
                "duplicate preset id '{}'",
                preset.id
            )));
        }
        presets.push(preset);
        Ok(())
    }

    /// Removes a preset by id.
    pub fn remove(&self, id: &str) -> Result<PresetRecord> {
        let mut presets = self.presets.write().unwrap_or_else(PoisonError::into_inner);
        let index = presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CompanionError::not_found("preset", id))?;
        Ok(presets.remove(index))
    }

    pub fn len(&self) -> usize {
        self.presets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PresetProvider for InMemoryPresetCollection {
    fn export(&self) -> Vec<PresetRecord> {
        self.presets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, presets: Vec<PresetRecord>) {
        let mut seen = HashSet::new();
        let unique: Vec<PresetRecord> = presets
            .into_iter()
            .filter(|p| {
                let fresh = seen.insert(p.id.clone());
                if !fresh {
                    tracing::warn!("[PresetCollection] Dropping duplicate preset id: {}", p.id);
                }
                fresh
            })
            .collect();

        *self.presets.write().unwrap_or_else(PoisonError::into_inner) = unique;
    }

    fn find_by_id(&self, id: &str) -> Option<PresetRecord> {
        self.presets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn set_group_ref(&self, preset_id: &str, group_id: Option<String>) -> bool {
        let mut presets = self.presets.write().unwrap_or_else(PoisonError::into_inner);
        match presets.iter_mut().find(|p| p.id == preset_id) {
            Some(preset) => {
                preset.group_id = group_id;
                true
            }
            None => false,
        }
    }
}
