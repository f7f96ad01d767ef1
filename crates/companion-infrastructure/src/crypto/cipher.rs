//! AES-256-CBC payload encryption.

use aes::Aes256;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use companion_core::PersistenceError;
use rand::RngCore;
use rand::rngs::OsRng;

use super::key_derivation::SaveKey;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Length of the IV prefix.
pub const IV_LEN: usize = 16;

/// Encrypts `plaintext` under `key` with a fresh random IV.
///
/// Returns `base64(IV ‖ ciphertext)`.
pub fn encrypt(plaintext: &str, key: &SaveKey) -> Result<String, PersistenceError> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| {
            tracing::error!("[SaveCipher] Failed to draw IV: {}", e);
            PersistenceError::EncryptionFailed
        })?;

    let encryptor = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| PersistenceError::EncryptionFailed)?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut payload = Vec::with_capacity(IV_LEN + ciphertext.len());
    payload.extend_from_slice(&iv);
    payload.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(payload))
}

/// Decrypts a blob produced by [`encrypt`].
///
/// Invalid base64, a payload shorter than the IV, bad padding, a wrong key
/// and non-UTF-8 plaintext all yield [`PersistenceError::DecryptionFailed`].
pub fn decrypt(blob: &str, key: &SaveKey) -> Result<String, PersistenceError> {
    let payload = STANDARD.decode(blob.trim()).map_err(|_| {
        tracing::debug!("[SaveCipher] Blob is not valid base64");
        PersistenceError::DecryptionFailed
    })?;

    if payload.len() < IV_LEN {
        tracing::debug!("[SaveCipher] Blob shorter than IV ({} bytes)", payload.len());
        return Err(PersistenceError::DecryptionFailed);
    }
    let (iv, ciphertext) = payload.split_at(IV_LEN);

    let decryptor = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| PersistenceError::DecryptionFailed)?;
    let plaintext = decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| PersistenceError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| PersistenceError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive_key;

    #[test]
    fn test_round_trip() {
        let key = derive_key("76561198000000000");
        let text = r#"{"userData":{"userName":"민지"}}"#;

        let blob = encrypt(text, &key).unwrap();
        assert_eq!(decrypt(&blob, &key).unwrap(), text);
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let key = derive_key("k");
        let blob = encrypt("", &key).unwrap();
        // One full padding block after the IV.
        assert_eq!(STANDARD.decode(&blob).unwrap().len(), IV_LEN + 16);
        assert_eq!(decrypt(&blob, &key).unwrap(), "");
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let key = derive_key("k");
        let a = encrypt("same text", &key).unwrap();
        let b = encrypt("same text", &key).unwrap();
        assert_ne!(a, b);
        assert_ne!(
            STANDARD.decode(&a).unwrap()[..IV_LEN],
            STANDARD.decode(&b).unwrap()[..IV_LEN]
        );
    }

    #[test]
    fn test_wrong_key_fails() {
        let blob = encrypt(
            "a snapshot body long enough to span several cipher blocks",
            &derive_key("right"),
        )
        .unwrap();
        assert_eq!(
            decrypt(&blob, &derive_key("wrong")),
            Err(PersistenceError::DecryptionFailed)
        );
    }

    #[test]
    fn test_invalid_base64_fails() {
        let key = derive_key("k");
        assert_eq!(
            decrypt("not base64 at all!!", &key),
            Err(PersistenceError::DecryptionFailed)
        );
    }

    #[test]
    fn test_short_payload_fails() {
        let key = derive_key("k");
        let short = STANDARD.encode([1u8; 8]);
        assert_eq!(decrypt(&short, &key), Err(PersistenceError::DecryptionFailed));

        let iv_only = STANDARD.encode([1u8; IV_LEN]);
        assert_eq!(decrypt(&iv_only, &key), Err(PersistenceError::DecryptionFailed));
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let key = derive_key("k");
        let blob = encrypt("some longer payload for truncation", &key).unwrap();
        let mut payload = STANDARD.decode(&blob).unwrap();
        payload.truncate(payload.len() - 5);
        assert_eq!(
            decrypt(&STANDARD.encode(payload), &key),
            Err(PersistenceError::DecryptionFailed)
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let key = derive_key("k");
        let blob = encrypt("payload", &key).unwrap();
        assert_eq!(decrypt(&format!("{blob}\n"), &key).unwrap(), "payload");
    }
}
