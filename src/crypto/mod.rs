//! Cryptographic primitives for AuthKeeper.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM sealing of a whole blob under a password (`encryption`)

pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, ...};
pub use encryption::{decrypt, encrypt, NONCE_LEN};
pub use kdf::{
    derive_key, derive_key_with_iterations, generate_salt, DerivedKey, PBKDF2_ITERATIONS, SALT_LEN,
};
