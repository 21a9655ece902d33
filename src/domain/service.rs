//! The credential service: the only mutation path for vault contents.
//!
//! Each operation is a full load → check → (modify → save) cycle. The
//! service holds no document between calls.

use chrono::Utc;
use zeroize::Zeroizing;

use super::ports::{Repository, Token, TokenProvider};
use crate::errors::{AuthKeeperError, Result};
use crate::vault::{Client, Session};

pub struct CredentialService<R, P> {
    repo: R,
    provider: P,
}

impl<R: Repository, P: TokenProvider> CredentialService<R, P> {
    pub fn new(repo: R, provider: P) -> Self {
        Self { repo, provider }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns the token provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `true` if a vault has been created.
    pub fn is_initialized(&self) -> bool {
        self.repo.exists()
    }

    /// `true` if the vault holds an encrypted document, so a password is
    /// already bound to it. Absent and zero-length vaults are both fresh.
    pub fn has_content(&self) -> bool {
        self.repo.has_content()
    }

    /// Verify `password` by loading the vault and return a session for it.
    ///
    /// An uninitialized vault accepts any password; the first `add` then
    /// encrypts with it.
    pub fn check_password(&self, password: impl Into<Zeroizing<String>>) -> Result<Session> {
        let session = Session::new(password);
        self.repo.load(&session)?;
        Ok(session)
    }

    /// Add a new client.
    ///
    /// Fails with `Validation` on an empty required field and with
    /// `DuplicateName` if the name is taken. `created_at` is stamped when
    /// unset.
    pub fn add(&self, session: &Session, mut client: Client) -> Result<()> {
        validate_client(&client)?;

        let mut document = self.repo.load(session)?;
        if document.contains(&client.name) {
            return Err(AuthKeeperError::DuplicateName(client.name));
        }

        if client.created_at.is_none() {
            client.created_at = Some(Utc::now());
        }

        tracing::info!(client = %client.name, "adding client");
        document.clients.push(client);
        self.repo.save(&document, session)
    }

    /// Fetch one client by exact name.
    pub fn get(&self, session: &Session, name: &str) -> Result<Client> {
        self.repo
            .load(session)?
            .remove(name)
            .ok_or_else(|| AuthKeeperError::NotFound(name.to_string()))
    }

    /// Client names in insertion order.
    pub fn list(&self, session: &Session) -> Result<Vec<String>> {
        Ok(self.repo.load(session)?.names())
    }

    /// All clients in insertion order.
    pub fn get_all(&self, session: &Session) -> Result<Vec<Client>> {
        Ok(self.repo.load(session)?.clients)
    }

    /// Remove a client by exact name.
    pub fn delete(&self, session: &Session, name: &str) -> Result<()> {
        let mut document = self.repo.load(session)?;
        if document.remove(name).is_none() {
            return Err(AuthKeeperError::NotFound(name.to_string()));
        }

        tracing::info!(client = %name, "deleting client");
        self.repo.save(&document, session)
    }

    /// Exchange a stored client's credentials for an access token.
    pub fn issue_token(&self, session: &Session, name: &str) -> Result<Token> {
        let client = self.get(session, name)?;
        tracing::info!(client = %client.name, "requesting token");
        self.provider.fetch_token(&client)
    }
}

/// Reject clients with an empty required field.
fn validate_client(client: &Client) -> Result<()> {
    let required = [
        (&client.name, "client name is required"),
        (&client.client_id, "client ID is required"),
        (&client.client_secret, "client secret is required"),
        (&client.token_url, "token URL is required"),
    ];

    for (value, message) in required {
        if value.is_empty() {
            return Err(AuthKeeperError::Validation(message.into()));
        }
    }
    Ok(())
}
