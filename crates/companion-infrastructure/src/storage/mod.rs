//! Storage layer: atomic file replacement and the encrypted save file.

mod atomic_file;
mod save_file;

pub use atomic_file::{AtomicFileError, TomlFile, temp_path_for, write_atomic};
pub use save_file::SaveFileStore;
