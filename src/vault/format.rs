//! Vault document serialization and raw file I/O.
//!
//! The decrypted payload is a JSON document:
//!
//! ```text
//! { "clients": [ { "name": ..., "client_id": ..., "client_secret": ...,
//!                  "token_url": ..., "scopes": [...], "created_at": ... } ] }
//! ```
//!
//! On disk the file is the opaque output of `crypto::encrypt` over those
//! bytes. An absent or zero-length file is an empty vault.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::client::Client;
use crate::errors::{AuthKeeperError, Result};

// ---------------------------------------------------------------------------
// VaultDocument
// ---------------------------------------------------------------------------

/// The full set of clients, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDocument {
    #[serde(default)]
    pub clients: Vec<Client>,
}

impl VaultDocument {
    /// Serialize to JSON. Field order is fixed by the struct definitions,
    /// so identical documents always produce identical bytes.
    ///
    /// The buffer holds client secrets and is wiped on drop.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec_pretty(self)
            .map(Zeroizing::new)
            .map_err(|e| AuthKeeperError::SerializationError(format!("vault document: {e}")))
    }

    /// Parse a decrypted payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| AuthKeeperError::CorruptVault(e.to_string()))
    }

    /// Find a client by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Client names in document order.
    pub fn names(&self) -> Vec<String> {
        self.clients.iter().map(|c| c.name.clone()).collect()
    }

    /// Remove the first client with this name and return it.
    pub fn remove(&mut self, name: &str) -> Option<Client> {
        let idx = self.clients.iter().position(|c| c.name == name)?;
        Some(self.clients.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Raw file I/O
// ---------------------------------------------------------------------------

/// Read the encrypted blob at `path`.
///
/// Returns `None` when the file is absent or empty.
pub fn read_blob(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) if data.is_empty() => Ok(None),
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write `data` to `path` **atomically**.
///
/// 1. Create the parent directory (`0700`) if it is missing.
/// 2. Write to a `0600` temp file in the same directory and fsync it.
/// 3. Rename the temp file over the target path.
///
/// Until the rename, the previous vault file is untouched.
pub fn write_blob_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    create_private_dir(parent)?;

    let tmp_path = temp_path_for(path);
    if let Err(e) = write_private_file(&tmp_path, data) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    // Persist the rename itself. Not every platform can open a directory
    // for syncing, so failures here are ignored.
    #[cfg(unix)]
    {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

/// `<dir>/.<file_name>.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

/// Create `dir` and any missing ancestors with owner-only permissions.
/// Existing directories keep their permissions.
fn create_private_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

fn write_private_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // A leftover temp file keeps its old mode through `truncate`.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(data)?;
    file.sync_all()
}
