//! Character group domain module.

mod model;
mod provider;

pub use model::GroupRecord;
pub use provider::{GroupProvider, InMemoryGroupCollection};
