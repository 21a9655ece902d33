//! The credential entry stored in a vault.
//!
//! A `Client` is identified by its `name`. Entries are never edited in
//! place: replacing one means deleting it and adding it again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OAuth2 client registration (client-credentials grant).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// User-facing key, unique within a vault (e.g. "billing-prod").
    pub name: String,

    pub client_id: String,

    pub client_secret: String,

    /// Token endpoint the credentials are exchanged at.
    pub token_url: String,

    /// Requested scopes, in the order the user gave them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,

    /// Set once when the client is first added.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Build a client with no scopes and no creation timestamp.
    pub fn new(
        name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: token_url.into(),
            scopes: Vec::new(),
            created_at: None,
        }
    }

    /// Replace the scope list.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }
}

// The secret must never end up in logs or panic messages.
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("scopes", &self.scopes)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Split a space-separated scope string into a list.
///
/// Extra whitespace is ignored; an empty or blank input yields no scopes.
pub fn parse_scopes(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}
