//! User profile collaborator.
//!
//! The persistence core never owns the live profile. It reads it through
//! [`UserProfileProvider::export`] when saving and hands a loaded one back
//! through [`UserProfileProvider::apply`].

use std::sync::{Arc, PoisonError, RwLock};

use super::model::UserProfile;

/// Owner of the live user profile.
pub trait UserProfileProvider: Send + Sync {
    /// Returns the current exportable profile.
    fn export(&self) -> UserProfile;

    /// Replaces the live profile with `profile`.
    fn apply(&self, profile: UserProfile);
}

/// Profile holder backed by a lock, used when no UI layer owns the profile.
///
/// # Example
///
/// ```
/// use companion_core::user::{InMemoryUserProfile, UserProfileProvider};
///
/// let provider = InMemoryUserProfile::default();
/// assert_eq!(provider.export().user_name, "Name");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserProfile {
    profile: Arc<RwLock<UserProfile>>,
}

impl InMemoryUserProfile {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile: Arc::new(RwLock::new(profile)),
        }
    }

    /// Mutates the live profile in place.
    pub fn update(&self, f: impl FnOnce(&mut UserProfile)) {
        f(&mut self.profile.write().unwrap_or_else(PoisonError::into_inner));
    }
}

impl UserProfileProvider for InMemoryUserProfile {
    fn export(&self) -> UserProfile {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, profile: UserProfile) {
        *self
            .profile
            .write()
            .unwrap_or_else(PoisonError::into_inner) = profile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_profile() {
        let provider = InMemoryUserProfile::default();
        let mut profile = provider.export();
        profile.user_name = "Mina".to_string();
        provider.apply(profile);

        assert_eq!(provider.export().user_name, "Mina");
    }

    #[test]
    fn test_clones_share_state() {
        let provider = InMemoryUserProfile::default();
        let view = provider.clone();
        provider.apply(UserProfile {
            api_key: "k".to_string(),
            ..UserProfile::default()
        });
        assert_eq!(view.export().api_key, "k");
    }

    #[test]
    fn test_update_in_place() {
        let provider = InMemoryUserProfile::default();
        provider.update(|p| p.api_key = "k".to_string());
        provider.update(|p| p.api_key.clear());
        assert!(provider.export().api_key.is_empty());
        assert_eq!(provider.export().user_name, "Name");
    }
}
