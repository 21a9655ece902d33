//! The on-disk vault.
//!
//! `VaultStore` is the only code that touches the vault file. Every `load`
//! reads and decrypts the whole file; every `save` re-encrypts the whole
//! document with a fresh salt and nonce and atomically replaces the file.
//!
//! No file lock is taken. Two processes saving the same path race and the
//! last rename wins.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::{decrypt, encrypt};
use crate::domain::Repository;
use crate::errors::{AuthKeeperError, Result};

use super::format::{self, VaultDocument};
use super::session::Session;

/// Handle to a vault file at a fixed path.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` if the vault file is present. No decryption is attempted.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `true` if the vault file is present and non-empty.
    pub fn has_content(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.len() > 0)
            .unwrap_or(false)
    }

    /// Read and decrypt the vault.
    ///
    /// An absent or zero-length file yields an empty document for any
    /// password.
    pub fn load(&self, session: &Session) -> Result<VaultDocument> {
        let Some(blob) = format::read_blob(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "vault empty or absent");
            return Ok(VaultDocument::default());
        };

        let plaintext = decrypt(&blob, session.password())
            .map(Zeroizing::new)
            .map_err(|e| {
                tracing::debug!(path = %self.path.display(), error = %e, "vault decryption failed");
                AuthKeeperError::WrongPasswordOrCorrupt
            })?;

        let document = VaultDocument::from_bytes(&plaintext)?;
        tracing::debug!(
            path = %self.path.display(),
            clients = document.len(),
            "vault loaded"
        );
        Ok(document)
    }

    /// Encrypt `document` and atomically replace the vault file.
    pub fn save(&self, document: &VaultDocument, session: &Session) -> Result<()> {
        let plaintext = document.to_bytes()?;
        let blob = encrypt(&plaintext, session.password())?;

        format::write_blob_atomic(&self.path, &blob)?;
        tracing::debug!(
            path = %self.path.display(),
            clients = document.len(),
            bytes = blob.len(),
            "vault saved"
        );
        Ok(())
    }
}

impl Repository for VaultStore {
    fn exists(&self) -> bool {
        VaultStore::exists(self)
    }

    fn has_content(&self) -> bool {
        VaultStore::has_content(self)
    }

    fn load(&self, session: &Session) -> Result<VaultDocument> {
        VaultStore::load(self, session)
    }

    fn save(&self, document: &VaultDocument, session: &Session) -> Result<()> {
        VaultStore::save(self, document, session)
    }
}
