//! Password-based key derivation.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;

/// Length of the derived AES-256 key.
pub const KEY_LEN: usize = 32;

/// Fixed salt shared by every save file.
pub const SALT: &[u8] = b"YourSaltHere";

pub const ITERATIONS: u32 = 1000;

/// A derived 256-bit save-file key.
#[derive(Clone, PartialEq, Eq)]
pub struct SaveKey([u8; KEY_LEN]);

impl SaveKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SaveKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SaveKey(<redacted>)")
    }
}

/// Derives the save-file key from an identity secret.
///
/// Deterministic: the same secret always yields the same key. HMAC-SHA1 is
/// the PRF so keys agree with existing save files.
pub fn derive_key(secret: &str) -> SaveKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha1>(secret.as_bytes(), SALT, ITERATIONS, &mut key);
    SaveKey(key)
}
