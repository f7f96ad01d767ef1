//! Character preset domain module.
//!
//! # Module Structure
//!
//! - `model`: Persisted preset record and the character mode enum
//! - `intimacy`: Score clamping and the 1..10 intimacy label scale
//! - `provider`: Collaborator trait and the in-memory preset collection

pub mod intimacy;
mod model;
mod provider;

pub use model::{CharacterMode, PresetRecord};
pub use provider::{InMemoryPresetCollection, PresetProvider};
