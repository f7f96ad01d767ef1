//! Application layer for companion persistence.
//!
//! This crate wires the domain collaborators to the storage and crypto
//! adapters: the save/load orchestrator, the autosave timer and the
//! load-complete notification.

pub mod autosave;
pub mod notifier;
pub mod orchestrator;

pub use autosave::{AutosavePolicy, SaveTarget};
pub use notifier::{LoadComplete, LoadNotifier};
pub use orchestrator::{Collaborators, LoadOutcome, SnapshotOrchestrator};
