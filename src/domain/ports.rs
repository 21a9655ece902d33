//! Capabilities the credential service depends on.
//!
//! The service only sees these traits, so tests can swap in in-memory
//! fakes for the vault file and the token endpoint.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::vault::{Client, Session, VaultDocument};

/// Whole-document storage for clients.
pub trait Repository {
    /// `true` if the backing store has been created.
    fn exists(&self) -> bool;

    /// `true` if the backing store holds an encrypted document. An
    /// existing but empty store is not initialized.
    fn has_content(&self) -> bool;

    /// Load the full document. An uninitialized store yields an empty one.
    fn load(&self, session: &Session) -> Result<VaultDocument>;

    /// Replace the full document.
    fn save(&self, document: &VaultDocument, session: &Session) -> Result<()>;
}

/// Exchanges client credentials for an access token.
pub trait TokenProvider {
    fn fetch_token(&self, client: &Client) -> Result<Token>;
}

/// An OAuth2 access token response.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds; `0` when the server did not say.
    #[serde(default)]
    pub expires_in: u64,
    /// Granted scope, space-separated; empty when the server did not say.
    #[serde(default)]
    pub scope: String,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}
