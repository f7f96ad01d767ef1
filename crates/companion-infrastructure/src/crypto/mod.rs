//! Save-file cryptography.
//!
//! - `key_derivation`: PBKDF2-HMAC-SHA1 from the identity secret to a 256-bit key
//! - `cipher`: AES-256-CBC/PKCS#7 with a random IV prefix, base64 wrapped
//!
//! Save files have the layout `base64(IV(16) ‖ ciphertext)`.

mod cipher;
mod key_derivation;

pub use cipher::{IV_LEN, decrypt, encrypt};
pub use key_derivation::{ITERATIONS, KEY_LEN, SALT, SaveKey, derive_key};
