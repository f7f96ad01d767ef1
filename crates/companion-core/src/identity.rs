//! Identity secret source.
//!
//! The save file is encrypted with a key derived from a stable per-user
//! secret supplied by the host platform.

/// Supplies the per-user secret used as the encryption password.
///
/// # Security Note
///
/// Implementations must never log the returned secret.
pub trait IdentityProvider: Send + Sync {
    /// Returns the secret, or `None` when no identity is available
    /// (for example, no platform session is running).
    fn try_get_stable_secret(&self) -> Option<String>;
}
