//! AES-256-GCM authenticated encryption under a password.
//!
//! Each call to `encrypt` draws a fresh random salt and a fresh random
//! 12-byte nonce, derives the key with PBKDF2 and prepends both to the
//! ciphertext. `decrypt` splits them back out before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 32-byte salt | 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::kdf::{derive_key, generate_salt, DerivedKey, SALT_LEN};
use crate::errors::{AuthKeeperError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `password`.
///
/// Returns `salt || nonce || ciphertext`.
pub fn encrypt(plaintext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let salt = generate_salt();
    let key = derive_key(password, &salt);

    let sealed = seal(&key, plaintext)?;

    let mut output = Vec::with_capacity(SALT_LEN + sealed.len());
    output.extend_from_slice(&salt);
    output.extend_from_slice(&sealed);
    Ok(output)
}

/// Decrypt a blob produced by `encrypt`.
///
/// A wrong password and a tampered blob both surface as
/// `DecryptionFailed`; the tag check cannot tell them apart.
pub fn decrypt(blob: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < SALT_LEN {
        return Err(AuthKeeperError::InvalidFormat(format!(
            "blob is {} bytes, shorter than the {SALT_LEN}-byte salt",
            blob.len()
        )));
    }

    let (salt, rest) = blob.split_at(SALT_LEN);
    let key = derive_key(password, salt);

    open(&key, rest)
}

/// Encrypt with an already-derived key. Output is `nonce || ciphertext`.
fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| AuthKeeperError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| AuthKeeperError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt `nonce || ciphertext` with an already-derived key.
fn open(key: &DerivedKey, nonce_and_ciphertext: &[u8]) -> Result<Vec<u8>> {
    if nonce_and_ciphertext.len() < NONCE_LEN {
        return Err(AuthKeeperError::InvalidFormat(format!(
            "missing nonce: {} bytes after salt, need at least {NONCE_LEN}",
            nonce_and_ciphertext.len()
        )));
    }

    let (nonce_bytes, ciphertext) = nonce_and_ciphertext.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| AuthKeeperError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| AuthKeeperError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::derive_key_with_iterations;

    fn fast_key(byte: u8) -> DerivedKey {
        derive_key_with_iterations(&[byte], b"unit-test-salt", 1).unwrap()
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = fast_key(1);
        let sealed = seal(&key, b"client_secret=abc").unwrap();
        assert_eq!(sealed.len(), NONCE_LEN + 17 + TAG_LEN);
        assert_eq!(open(&key, &sealed).unwrap(), b"client_secret=abc");
    }

    #[test]
    fn seal_uses_fresh_nonce() {
        let key = fast_key(2);
        let a = seal(&key, b"same").unwrap();
        let b = seal(&key, b"same").unwrap();
        assert_ne!(a[..NONCE_LEN], b[..NONCE_LEN]);
    }

    #[test]
    fn open_rejects_wrong_key() {
        let sealed = seal(&fast_key(3), b"data").unwrap();
        assert!(matches!(
            open(&fast_key(4), &sealed),
            Err(AuthKeeperError::DecryptionFailed)
        ));
    }

    #[test]
    fn open_rejects_short_input_as_format_error() {
        let key = fast_key(5);
        assert!(matches!(
            open(&key, &[0u8; NONCE_LEN - 1]),
            Err(AuthKeeperError::InvalidFormat(_))
        ));
    }

    #[test]
    fn open_rejects_every_flipped_bit() {
        let key = fast_key(6);
        let sealed = seal(&key, b"tamper me").unwrap();

        for byte in 0..sealed.len() {
            for bit in 0..8 {
                let mut tampered = sealed.clone();
                tampered[byte] ^= 1 << bit;
                assert!(
                    open(&key, &tampered).is_err(),
                    "flip at byte {byte} bit {bit} went undetected"
                );
            }
        }
    }

    #[test]
    fn decrypt_rejects_blob_shorter_than_salt() {
        assert!(matches!(
            decrypt(&[0u8; SALT_LEN - 1], b"pw"),
            Err(AuthKeeperError::InvalidFormat(_))
        ));
    }
}
