//! Snapshot text encoding.
//!
//! Snapshots are stored as indented JSON so a decrypted save can be read and
//! diffed by hand. Field names are the wire contract; there is no migration
//! layer, so renaming a field breaks existing saves.

use companion_core::{AppSnapshot, PersistenceError};

pub struct SnapshotCodec;

impl SnapshotCodec {
    /// Encodes a snapshot as indented JSON.
    ///
    /// Refuses snapshots with NaN or infinite floats; those would be written
    /// as `null` and the save could no longer be loaded.
    pub fn serialize(snapshot: &AppSnapshot) -> Result<String, PersistenceError> {
        if let Some(field) = snapshot.non_finite_field() {
            tracing::warn!("[SnapshotCodec] Refusing non-finite value in {}", field);
            return Err(PersistenceError::SerializationFailed(format!(
                "non-finite number in {field}"
            )));
        }
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    /// Parses snapshot JSON.
    pub fn deserialize(text: &str) -> Result<AppSnapshot, PersistenceError> {
        serde_json::from_str(text).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }
}
