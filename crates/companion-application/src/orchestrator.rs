//! Save/load state machine over the application's collaborators.
//!
//! Save gathers the live state into an [`AppSnapshot`], seals it and writes
//! it. Load reverses the pipeline and hands every part back to its owner,
//! then resolves the id-based links between groups and presets.

use std::collections::HashSet;
use std::sync::Arc;

use companion_core::config::ConfigProvider;
use companion_core::display_order::{group_key, preset_key, sort_by_saved_order};
use companion_core::group::{GroupProvider, GroupRecord};
use companion_core::identity::IdentityProvider;
use companion_core::mode::{IndexParse, parse_index};
use companion_core::preset::{CharacterMode, PresetProvider, PresetRecord};
use companion_core::user::{UserMode, UserProfileProvider};
use companion_core::{AppSnapshot, BlobStore, PersistenceError};
use companion_infrastructure::SnapshotCodec;
use companion_infrastructure::crypto::{self, SaveKey};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::autosave::SaveTarget;
use crate::notifier::{LoadComplete, LoadNotifier};

/// The subsystems that own live application state.
#[derive(Clone)]
pub struct Collaborators {
    pub user: Arc<dyn UserProfileProvider>,
    pub presets: Arc<dyn PresetProvider>,
    pub groups: Arc<dyn GroupProvider>,
    pub config: Arc<dyn ConfigProvider>,
}

/// How a successful load finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A save file was decrypted and applied.
    Restored,
    /// No save file exists; collaborators keep their built-in defaults.
    FirstRun,
}

/// Coordinates save and load of the whole application snapshot.
///
/// Both operations take `&mut self`, so a save can never overlap a load.
/// Failures are logged and returned; collaborators are left untouched by
/// a failed load and are never written by a save.
pub struct SnapshotOrchestrator {
    collaborators: Collaborators,
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn BlobStore>,
    notifier: LoadNotifier,
}

impl SnapshotOrchestrator {
    pub fn new(
        collaborators: Collaborators,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            collaborators,
            identity,
            store,
            notifier: LoadNotifier::new(),
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn notifier_mut(&mut self) -> &mut LoadNotifier {
        &mut self.notifier
    }

    /// Registers a callback run after every successful or first-run load.
    pub fn on_load_complete(&mut self, observer: impl Fn() + Send + Sync + 'static) {
        self.notifier.on_load_complete(observer);
    }

    /// Opens a channel that receives one message per completed load.
    pub fn subscribe(&mut self) -> UnboundedReceiver<LoadComplete> {
        self.notifier.subscribe()
    }

    /// Gathers, seals and writes the current state.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        let result = self.save_inner();

        match &result {
            Ok(()) => tracing::info!("[SnapshotOrchestrator] Snapshot saved"),
            Err(e) => tracing::error!("[SnapshotOrchestrator] Save aborted: {}", e),
        }
        result
    }

    /// Reads, opens and applies the saved state, then publishes
    /// [`LoadComplete`] once.
    pub fn load(&mut self) -> Result<LoadOutcome, PersistenceError> {
        let result = self.load_inner();

        match &result {
            Ok(LoadOutcome::Restored) => {
                tracing::info!("[SnapshotOrchestrator] Snapshot restored");
                self.notifier.publish();
            }
            Ok(LoadOutcome::FirstRun) => {
                tracing::info!("[SnapshotOrchestrator] No save file, starting with defaults");
                self.notifier.publish();
            }
            Err(e) => {
                tracing::error!(
                    "[SnapshotOrchestrator] Load aborted, keeping current state: {}",
                    e
                );
            }
        }
        result
    }

    /// Final save on application exit.
    pub fn shutdown(&mut self) -> Result<(), PersistenceError> {
        tracing::info!("[SnapshotOrchestrator] Shutting down, writing final save");
        self.save()
    }

    /// Current live state as a snapshot.
    pub fn gather(&self) -> AppSnapshot {
        let c = &self.collaborators;
        AppSnapshot::new(
            c.user.export(),
            c.presets.export(),
            c.groups.export(),
            c.config.export(),
        )
    }

    fn save_inner(&self) -> Result<(), PersistenceError> {
        let snapshot = self.gather();
        let key = self.session_key()?;
        let text = SnapshotCodec::serialize(&snapshot)?;
        let blob = crypto::encrypt(&text, &key)?;
        self.store.write_blob(&blob)
    }

    fn load_inner(&self) -> Result<LoadOutcome, PersistenceError> {
        let Some(blob) = self.store.read_blob()? else {
            return Ok(LoadOutcome::FirstRun);
        };

        let key = self.session_key()?;
        let text = crypto::decrypt(&blob, &key)?;
        let snapshot = SnapshotCodec::deserialize(&text)?;

        self.distribute(snapshot);
        Ok(LoadOutcome::Restored)
    }

    fn session_key(&self) -> Result<SaveKey, PersistenceError> {
        let secret = self
            .identity
            .try_get_stable_secret()
            .ok_or(PersistenceError::IdentityUnavailable)?;
        Ok(crypto::derive_key(&secret))
    }

    fn distribute(&self, snapshot: AppSnapshot) {
        let AppSnapshot {
            mut user,
            presets,
            groups,
            mut config,
        } = snapshot;

        if let IndexParse::Invalid(raw) = parse_index::<UserMode>(user.condition_index) {
            tracing::warn!(
                "[SnapshotOrchestrator] Unknown user mode {}, falling back to {}",
                raw,
                UserMode::On
            );
            user.set_mode(UserMode::On);
        }

        if let IndexParse::Invalid(raw) = config.model_mode() {
            let current = self.collaborators.config.export().model_mode;
            tracing::warn!(
                "[SnapshotOrchestrator] Unknown model mode {}, keeping current mode {}",
                raw,
                current
            );
            config.model_mode = current;
        }

        let presets: Vec<PresetRecord> = presets.into_iter().map(normalize_preset).collect();
        let groups: Vec<GroupRecord> = groups
            .into_iter()
            .map(|mut group| {
                group.has_notification = false;
                group
            })
            .collect();

        let presets = sort_by_saved_order(presets, &config.display_order, |p| preset_key(&p.id));
        let groups = sort_by_saved_order(groups, &config.display_order, |g| {
            group_key(&g.group_id)
        });

        let stored_refs: Vec<(String, Option<String>)> = presets
            .iter()
            .map(|p| (p.id.clone(), p.group_id.clone()))
            .collect();
        let memberships: Vec<(String, Vec<String>)> = groups
            .iter()
            .map(|g| (g.group_id.clone(), g.member_preset_ids.clone()))
            .collect();

        tracing::debug!(
            "[SnapshotOrchestrator] Applying {} presets, {} groups",
            presets.len(),
            groups.len()
        );
        let c = &self.collaborators;
        c.user.apply(user);
        c.presets.apply(presets);
        c.groups.apply(groups);
        c.config.apply(config);

        self.reconcile_group_refs(&stored_refs, &memberships);
    }

    /// Points each member preset at its group and clears references to
    /// groups that no longer exist.
    fn reconcile_group_refs(
        &self,
        stored_refs: &[(String, Option<String>)],
        memberships: &[(String, Vec<String>)],
    ) {
        let presets = &self.collaborators.presets;
        let group_ids: HashSet<&str> = memberships.iter().map(|(id, _)| id.as_str()).collect();

        for (preset_id, group_id) in stored_refs {
            if let Some(group_id) = group_id {
                if !group_ids.contains(group_id.as_str()) {
                    tracing::warn!(
                        "[SnapshotOrchestrator] Preset {} names missing group {}, clearing",
                        preset_id,
                        group_id
                    );
                    presets.set_group_ref(preset_id, None);
                }
            }
        }

        let mut resolved = 0usize;
        let mut dangling = 0usize;
        for (group_id, members) in memberships {
            for member_id in members {
                if presets.find_by_id(member_id).is_some() {
                    presets.set_group_ref(member_id, Some(group_id.clone()));
                    resolved += 1;
                } else {
                    tracing::warn!(
                        "[SnapshotOrchestrator] Group {} lists unknown preset {}",
                        group_id,
                        member_id
                    );
                    dangling += 1;
                }
            }
        }

        tracing::debug!(
            "[SnapshotOrchestrator] Resolved {} group references ({} dangling)",
            resolved,
            dangling
        );
    }
}

fn normalize_preset(mut preset: PresetRecord) -> PresetRecord {
    if let IndexParse::Invalid(raw) = parse_index::<CharacterMode>(preset.current_mode) {
        tracing::warn!(
            "[SnapshotOrchestrator] Preset {} has unknown mode {}, falling back to {}",
            preset.id,
            raw,
            CharacterMode::Off
        );
        preset.set_mode(CharacterMode::Off);
    }
    preset.normalize_intimacy();
    preset
}

impl SaveTarget for SnapshotOrchestrator {
    type Error = PersistenceError;

    fn save(&mut self) -> Result<(), Self::Error> {
        SnapshotOrchestrator::save(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::config::InMemoryConfig;
    use companion_core::group::InMemoryGroupCollection;
    use companion_core::preset::InMemoryPresetCollection;
    use companion_core::user::InMemoryUserProfile;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        blob: Mutex<Option<String>>,
    }

    impl BlobStore for MemoryStore {
        fn read_blob(&self) -> Result<Option<String>, PersistenceError> {
            Ok(self.blob.lock().unwrap().clone())
        }

        fn write_blob(&self, blob: &str) -> Result<(), PersistenceError> {
            *self.blob.lock().unwrap() = Some(blob.to_string());
            Ok(())
        }
    }

    struct Secret(&'static str);

    impl IdentityProvider for Secret {
        fn try_get_stable_secret(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    struct Parts {
        presets: InMemoryPresetCollection,
        groups: InMemoryGroupCollection,
        config: InMemoryConfig,
        user: InMemoryUserProfile,
    }

    fn orchestrator(store: Arc<MemoryStore>) -> (SnapshotOrchestrator, Parts) {
        let parts = Parts {
            presets: InMemoryPresetCollection::new(),
            groups: InMemoryGroupCollection::new(),
            config: InMemoryConfig::default(),
            user: InMemoryUserProfile::default(),
        };
        let collaborators = Collaborators {
            user: Arc::new(parts.user.clone()),
            presets: Arc::new(parts.presets.clone()),
            groups: Arc::new(parts.groups.clone()),
            config: Arc::new(parts.config.clone()),
        };
        let orchestrator =
            SnapshotOrchestrator::new(collaborators, Arc::new(Secret("1234")), store);
        (orchestrator, parts)
    }

    #[test]
    fn test_load_normalizes_modes_and_intimacy() {
        let store = Arc::new(MemoryStore::default());
        let (mut writer, parts) = orchestrator(store.clone());

        let mut preset = PresetRecord::with_id("p1", "Alex");
        preset.current_mode = 7;
        preset.internal_intimacy_score = 250.0;
        preset.intimacy = "3".to_string();
        parts.presets.insert(preset).unwrap();
        parts.user.update(|u| u.condition_index = -1);
        parts.config.update(|c| c.model_mode = 9);
        writer.save().unwrap();

        let (mut reader, loaded) = orchestrator(store);
        loaded.config.update(|c| c.model_mode = 2);
        reader.load().unwrap();

        let preset = loaded.presets.find_by_id("p1").unwrap();
        assert_eq!(preset.mode(), CharacterMode::Off);
        assert_eq!(preset.current_mode, 0);
        assert_eq!(preset.internal_intimacy_score, 100.0);
        assert_eq!(preset.intimacy, "10");
        assert_eq!(loaded.user.export().condition_index, 0);
        assert_eq!(loaded.config.export().model_mode, 2);
    }

    #[test]
    fn test_notification_flag_reset_on_load() {
        let store = Arc::new(MemoryStore::default());
        let (mut writer, parts) = orchestrator(store.clone());
        let mut group = GroupRecord::with_id("g1", "Study");
        group.has_notification = true;
        parts.groups.upsert(group);
        writer.save().unwrap();

        let (mut reader, loaded) = orchestrator(store);
        reader.load().unwrap();
        assert!(!loaded.groups.get("g1").unwrap().has_notification);
    }

    #[test]
    fn test_stale_group_ref_cleared_and_membership_wins() {
        let store = Arc::new(MemoryStore::default());
        let (mut writer, parts) = orchestrator(store.clone());

        let mut orphan = PresetRecord::with_id("p1", "Orphan");
        orphan.group_id = Some("gone".to_string());
        let mut moved = PresetRecord::with_id("p2", "Moved");
        moved.group_id = Some("g_old".to_string());
        parts.presets.insert(orphan).unwrap();
        parts.presets.insert(moved).unwrap();

        let g_old = GroupRecord::with_id("g_old", "Old");
        let mut g_new = GroupRecord::with_id("g_new", "New");
        g_new.member_preset_ids = vec!["p2".to_string(), "ghost".to_string()];
        parts.groups.upsert(g_old);
        parts.groups.upsert(g_new);
        writer.save().unwrap();

        let (mut reader, loaded) = orchestrator(store);
        reader.load().unwrap();

        assert_eq!(loaded.presets.find_by_id("p1").unwrap().group_id, None);
        assert_eq!(
            loaded.presets.find_by_id("p2").unwrap().group_id.as_deref(),
            Some("g_new")
        );
        // Dangling members are kept as-is.
        assert_eq!(
            loaded.groups.get("g_new").unwrap().member_preset_ids,
            vec!["p2".to_string(), "ghost".to_string()]
        );
    }

    #[test]
    fn test_display_order_restored() {
        let store = Arc::new(MemoryStore::default());
        let (mut writer, parts) = orchestrator(store.clone());
        for id in ["a", "b", "c"] {
            parts.presets.insert(PresetRecord::with_id(id, id)).unwrap();
        }
        parts.groups.upsert(GroupRecord::with_id("g1", "One"));
        parts.groups.upsert(GroupRecord::with_id("g2", "Two"));
        parts.config.update(|c| {
            c.display_order = vec![
                preset_key("c"),
                group_key("g2"),
                preset_key("a"),
                group_key("g1"),
            ];
        });
        writer.save().unwrap();

        let (mut reader, loaded) = orchestrator(store);
        reader.load().unwrap();

        let preset_ids: Vec<String> = loaded.presets.export().into_iter().map(|p| p.id).collect();
        assert_eq!(preset_ids, vec!["c", "a", "b"]);
        let group_ids: Vec<String> = loaded
            .groups
            .export()
            .into_iter()
            .map(|g| g.group_id)
            .collect();
        assert_eq!(group_ids, vec!["g2", "g1"]);
    }

    #[test]
    fn test_save_target_delegates() {
        let store = Arc::new(MemoryStore::default());
        let (mut orchestrator, _) = orchestrator(store.clone());

        SaveTarget::save(&mut orchestrator).unwrap();
        assert!(store.blob.lock().unwrap().is_some());
    }
}
