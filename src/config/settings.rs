use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{AuthKeeperError, Result};

/// Name of the per-user directory under `$HOME`.
const DIR_NAME: &str = ".authkeeper";

/// Default vault file name inside the config directory.
const VAULT_FILE_NAME: &str = "vault.enc";

/// User-level configuration, loaded from `~/.authkeeper/config.toml`.
///
/// Every field has a sensible default so AuthKeeper works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file location. Relative paths are resolved against the
    /// config directory. Defaults to `<config_dir>/vault.enc`.
    #[serde(default)]
    pub vault_path: Option<PathBuf>,

    /// Timeout for token endpoint requests, in seconds (default: 30).
    #[serde(default = "default_token_timeout_secs")]
    pub token_timeout_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_token_timeout_secs() -> u64 {
    30
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: None,
            token_timeout_secs: default_token_timeout_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            AuthKeeperError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.token_timeout_secs == 0 {
            return Err(AuthKeeperError::ConfigError(
                "token_timeout_secs must be at least 1".into(),
            ));
        }

        Ok(settings)
    }

    /// Resolve the vault file path.
    ///
    /// Example: `/home/user/.authkeeper/vault.enc`
    pub fn vault_path(&self, config_dir: &Path) -> PathBuf {
        match &self.vault_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => config_dir.join(p),
            None => config_dir.join(VAULT_FILE_NAME),
        }
    }

    /// Token request timeout as a `Duration`.
    pub fn token_timeout(&self) -> Duration {
        Duration::from_secs(self.token_timeout_secs)
    }
}

/// `$HOME/.authkeeper` (falls back to `%USERPROFILE%` on Windows).
pub fn default_config_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AuthKeeperError::ConfigError("cannot determine home directory".into()))?;
    Ok(PathBuf::from(home).join(DIR_NAME))
}

// ── Tests ────────────────────────────────────────────────────────────
