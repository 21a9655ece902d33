//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{default_config_dir, Settings};
use crate::domain::CredentialService;
use crate::errors::{AuthKeeperError, Result};
use crate::provider::OAuthProvider;
use crate::vault::{Session, VaultStore};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "AUTHKEEPER_PASSWORD";

/// The service type every command works against.
pub type Service = CredentialService<VaultStore, OAuthProvider>;

/// AuthKeeper CLI: encrypted OAuth2 client credential manager.
#[derive(Parser)]
#[command(
    name = "authkeeper",
    about = "OAuth2 client credential manager with an encrypted local vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the encrypted vault file (default: ~/.authkeeper/vault.enc)
    #[arg(long, env = "AUTHKEEPER_VAULT", global = true)]
    pub vault: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new OAuth2 client to the vault
    Add {
        /// Client name (unique key in the vault)
        #[arg(long)]
        name: Option<String>,
        /// OAuth2 client ID
        #[arg(long)]
        client_id: Option<String>,
        /// OAuth2 client secret (omit for a hidden prompt)
        #[arg(long)]
        client_secret: Option<String>,
        /// Token endpoint URL
        #[arg(long)]
        token_url: Option<String>,
        /// Scope to request (repeatable)
        #[arg(long = "scope")]
        scopes: Vec<String>,
        /// Save without the review prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List all clients
    List,

    /// Show one client's details
    Show {
        /// Client name
        name: String,
        /// Print the client secret instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Issue an access token (client-credentials grant)
    Token {
        /// Client name (omit to pick from a list)
        name: Option<String>,
        /// Print only the access token
        #[arg(long)]
        raw: bool,
    },

    /// Delete a client
    Delete {
        /// Client name (omit to pick from a list)
        name: Option<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault path: `--vault` / `AUTHKEEPER_VAULT` first, then the
/// config file, then `~/.authkeeper/vault.enc`.
pub fn vault_path(cli: &Cli, settings: &Settings, config_dir: &std::path::Path) -> PathBuf {
    match &cli.vault {
        Some(path) => path.clone(),
        None => settings.vault_path(config_dir),
    }
}

/// Build the credential service from CLI arguments and user settings.
pub fn build_service(cli: &Cli) -> Result<Service> {
    let config_dir = default_config_dir()?;
    let settings = Settings::load(&config_dir)?;
    let path = vault_path(cli, &settings, &config_dir);
    tracing::debug!(vault = %path.display(), "using vault");

    Ok(CredentialService::new(
        VaultStore::new(path),
        OAuthProvider::new(settings.token_timeout()),
    ))
}

/// Prompt for the password of an existing vault and open a session.
///
/// Fails with `VaultNotInitialized` if there is no vault file yet, or the
/// file is empty.
pub fn unlock(service: &Service) -> Result<Session> {
    if !service.has_content() {
        return Err(AuthKeeperError::VaultNotInitialized(
            service.repository().path().to_path_buf(),
        ));
    }
    let password = prompt_password()?;
    service.check_password(password)
}

/// Get the master password, trying in order:
/// 1. `AUTHKEEPER_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| AuthKeeperError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (first `add`).
///
/// Also respects `AUTHKEEPER_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if is_too_short(&pw) {
            return Err(AuthKeeperError::CommandFailed(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        return Ok(pw);
    }

    output::info("You're creating a new vault. Choose a strong master password.");
    output::warning("This password encrypts all your credentials — don't forget it!");

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| AuthKeeperError::CommandFailed(format!("password prompt: {e}")))?;

        if is_too_short(&password) {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Length is measured in characters, not bytes.
fn is_too_short(password: &str) -> bool {
    password.chars().count() < MIN_PASSWORD_LEN
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Let the user pick one name from a list.
pub fn select_name(prompt: &str, names: &[String]) -> Result<String> {
    let idx = dialoguer::Select::new()
        .with_prompt(prompt)
        .items(names)
        .default(0)
        .interact()
        .map_err(|e| AuthKeeperError::CommandFailed(format!("selection prompt: {e}")))?;
    Ok(names[idx].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn vault_flag_overrides_settings() {
        let cli = parse(&["authkeeper", "--vault", "/tmp/other.enc", "list"]);
        let config_dir = std::path::Path::new("/home/u/.authkeeper");
        let path = vault_path(&cli, &Settings::default(), config_dir);
        assert_eq!(path, PathBuf::from("/tmp/other.enc"));
    }

    #[test]
    fn vault_defaults_to_settings() {
        let cli = Cli {
            command: Commands::List,
            vault: None,
        };
        let config_dir = std::path::Path::new("/home/u/.authkeeper");
        let path = vault_path(&cli, &Settings::default(), config_dir);
        assert_eq!(path, PathBuf::from("/home/u/.authkeeper/vault.enc"));
    }

    #[test]
    fn add_collects_repeated_scopes() {
        let cli = parse(&[
            "authkeeper", "add", "--name", "svc", "--scope", "read", "--scope", "write",
        ]);
        match cli.command {
            Commands::Add { name, scopes, .. } => {
                assert_eq!(name.as_deref(), Some("svc"));
                assert_eq!(scopes, vec!["read", "write"]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn minimum_length_counts_characters() {
        assert!(is_too_short("ééééééé"));
        assert!(!is_too_short("éééééééé"));
        assert!(is_too_short("short"));
        assert!(!is_too_short("12345678"));
    }

    #[test]
    fn token_name_is_optional() {
        let cli = parse(&["authkeeper", "token"]);
        assert!(matches!(cli.command, Commands::Token { name: None, raw: false }));
    }

    #[test]
    fn completions_rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["authkeeper", "completions", "csh"]).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
