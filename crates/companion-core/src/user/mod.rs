//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User profile snapshot model and the user mode enum
//! - `service`: Collaborator trait and the in-memory profile holder
//!
//! # Usage
//!
//! ```ignore
//! use companion_core::user::{UserProfile, UserMode, UserProfileProvider};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::{UserMode, UserProfile};
pub use service::{InMemoryUserProfile, UserProfileProvider};
