//! Identity secret providers.
//!
//! The provider is picked once at startup from [`IdentitySource`]; nothing
//! here is selected by conditional compilation.

use std::sync::Arc;

use companion_core::identity::IdentityProvider;

use crate::settings::IdentitySource;

/// Secret used when no platform session exists.
pub const DEBUG_SECRET: &str = "non_steam_debug_key";

/// Platform user identity published by the host launcher in an environment
/// variable. Only a numeric id is accepted.
#[derive(Debug, Clone)]
pub struct PlatformIdentity {
    env_var: String,
}

impl PlatformIdentity {
    pub fn new(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
        }
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Validates a raw platform id: trimmed, non-empty, all digits.
    fn accept(raw: &str) -> Option<String> {
        let id = raw.trim();
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(id.to_string())
    }
}

impl IdentityProvider for PlatformIdentity {
    fn try_get_stable_secret(&self) -> Option<String> {
        let raw = std::env::var(&self.env_var).ok()?;
        let secret = Self::accept(&raw);
        if secret.is_none() {
            tracing::warn!(
                "[PlatformIdentity] {} is set but is not a numeric user id",
                self.env_var
            );
        }
        secret
    }
}

/// Always yields [`DEBUG_SECRET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugIdentity;

impl IdentityProvider for DebugIdentity {
    fn try_get_stable_secret(&self) -> Option<String> {
        Some(DEBUG_SECRET.to_string())
    }
}

/// A configured secret. An empty secret counts as unavailable.
#[derive(Clone)]
pub struct FixedIdentity(String);

impl FixedIdentity {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl std::fmt::Debug for FixedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FixedIdentity(<redacted>)")
    }
}

impl IdentityProvider for FixedIdentity {
    fn try_get_stable_secret(&self) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.clone())
    }
}

/// Builds the provider named by the settings.
pub fn identity_from_settings(source: &IdentitySource) -> Arc<dyn IdentityProvider> {
    match source {
        IdentitySource::Platform { env_var } => Arc::new(PlatformIdentity::new(env_var.clone())),
        IdentitySource::Debug => Arc::new(DebugIdentity),
        IdentitySource::Fixed { secret } => Arc::new(FixedIdentity::new(secret.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_accepts_numeric_ids_only() {
        assert_eq!(
            PlatformIdentity::accept("76561198000000000").as_deref(),
            Some("76561198000000000")
        );
        assert_eq!(PlatformIdentity::accept(" 42\n").as_deref(), Some("42"));
        assert_eq!(PlatformIdentity::accept(""), None);
        assert_eq!(PlatformIdentity::accept("   "), None);
        assert_eq!(PlatformIdentity::accept("user42"), None);
        assert_eq!(PlatformIdentity::accept("-42"), None);
    }

    #[test]
    fn test_platform_unset_var_is_unavailable() {
        let provider = PlatformIdentity::new("COMPANION_TEST_VAR_THAT_IS_NEVER_SET_9f2c");
        assert_eq!(provider.try_get_stable_secret(), None);
    }

    #[test]
    fn test_debug_identity() {
        assert_eq!(
            DebugIdentity.try_get_stable_secret().as_deref(),
            Some("non_steam_debug_key")
        );
    }

    #[test]
    fn test_fixed_identity() {
        assert_eq!(
            FixedIdentity::new("s3cret").try_get_stable_secret().as_deref(),
            Some("s3cret")
        );
        assert_eq!(FixedIdentity::new("").try_get_stable_secret(), None);
        assert!(!format!("{:?}", FixedIdentity::new("s3cret")).contains("s3cret"));
    }

    #[test]
    fn test_identity_from_settings() {
        let debug = identity_from_settings(&IdentitySource::Debug);
        assert_eq!(debug.try_get_stable_secret().as_deref(), Some(DEBUG_SECRET));

        let fixed = identity_from_settings(&IdentitySource::Fixed {
            secret: "abc".to_string(),
        });
        assert_eq!(fixed.try_get_stable_secret().as_deref(), Some("abc"));

        let platform = identity_from_settings(&IdentitySource::Platform {
            env_var: "COMPANION_TEST_VAR_THAT_IS_NEVER_SET_9f2c".to_string(),
        });
        assert_eq!(platform.try_get_stable_secret(), None);
    }
}
