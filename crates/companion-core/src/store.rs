//! Persistence error taxonomy and the blob storage seam.

use thiserror::Error;

/// Why a save or load did not complete.
///
/// A missing save file is not an error; see [`BlobStore::read_blob`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// No identity secret is available to derive the key from.
    #[error("identity secret unavailable")]
    IdentityUnavailable,

    /// The snapshot text could not be encrypted.
    #[error("encryption failed")]
    EncryptionFailed,

    /// Wrong key, corrupt or truncated ciphertext. Deliberately carries no
    /// detail.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The snapshot could not be converted to or from text.
    #[error("snapshot serialization failed: {0}")]
    SerializationFailed(String),

    /// The save file exists but could not be read.
    #[error("failed to read save file: {0}")]
    StoreReadFailed(String),

    /// The save file could not be written.
    #[error("failed to write save file: {0}")]
    StoreWriteFailed(String),
}

/// Storage for the single encrypted save blob.
pub trait BlobStore: Send + Sync {
    /// Reads the whole blob. `Ok(None)` means no save exists yet, which is
    /// the normal first-run state.
    fn read_blob(&self) -> Result<Option<String>, PersistenceError>;

    /// Replaces the stored blob with `blob`.
    fn write_blob(&self, blob: &str) -> Result<(), PersistenceError>;
}
