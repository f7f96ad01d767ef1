//! The single save file holding the encrypted snapshot blob.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use companion_core::{BlobStore, PersistenceError};

use super::atomic_file::write_atomic;

/// [`BlobStore`] backed by one file on local disk.
///
/// The blob is plain base64 text. Writes replace the whole file through a
/// temporary sibling, so a crash mid-write leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct SaveFileStore {
    path: PathBuf,
}

impl SaveFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl BlobStore for SaveFileStore {
    fn read_blob(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("[SaveFileStore] No save file at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(PersistenceError::StoreReadFailed(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_blob(&self, blob: &str) -> Result<(), PersistenceError> {
        write_atomic(&self.path, blob.as_bytes()).map_err(|e| {
            PersistenceError::StoreWriteFailed(format!("{}: {}", self.path.display(), e))
        })?;
        tracing::debug!(
            "[SaveFileStore] Wrote {} bytes to {}",
            blob.len(),
            self.path.display()
        );
        Ok(())
    }
}
