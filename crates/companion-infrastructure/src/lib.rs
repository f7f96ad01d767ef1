//! Storage, cryptography and platform adapters for snapshot persistence.

pub mod codec;
pub mod crypto;
pub mod identity;
pub mod paths;
pub mod settings;
pub mod storage;

pub use crate::codec::SnapshotCodec;
pub use crate::identity::{DebugIdentity, FixedIdentity, PlatformIdentity, identity_from_settings};
pub use crate::paths::CompanionPaths;
pub use crate::settings::{IdentitySource, PersistenceSettings};
pub use crate::storage::SaveFileStore;
