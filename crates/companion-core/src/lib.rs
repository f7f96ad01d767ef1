//! Domain model and collaborator interfaces for the companion app's
//! encrypted snapshot persistence.

pub mod config;
pub mod display_order;
pub mod error;
pub mod group;
pub mod identity;
pub mod mode;
pub mod preset;
pub mod snapshot;
pub mod store;
pub mod user;

// Re-export common types
pub use error::{CompanionError, Result};
pub use snapshot::AppSnapshot;
pub use store::{BlobStore, PersistenceError};
