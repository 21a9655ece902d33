use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in AuthKeeper.
#[derive(Debug, Error)]
pub enum AuthKeeperError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — authentication tag did not verify")]
    DecryptionFailed,

    #[error("Invalid ciphertext format: {0}")]
    InvalidFormat(String),

    // --- Vault errors ---
    #[error("Failed to decrypt vault — wrong password or corrupted file")]
    WrongPasswordOrCorrupt,

    #[error("Vault contents could not be parsed: {0}")]
    CorruptVault(String),

    #[error("Vault not initialized at {0} — add a client first")]
    VaultNotInitialized(PathBuf),

    // --- Domain errors ---
    #[error("Invalid client: {0}")]
    Validation(String),

    #[error("Client '{0}' already exists")]
    DuplicateName(String),

    #[error("Client '{0}' not found")]
    NotFound(String),

    // --- Token errors ---
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Token request failed with status {status}: {body}")]
    TokenRequestFailed { status: u16, body: String },

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for AuthKeeper results.
pub type Result<T> = std::result::Result<T, AuthKeeperError>;
