//! OAuth2 client-credentials token provider.
//!
//! A single blocking POST to the client's token endpoint (RFC 6749 §4.4).
//! No retries; the caller decides what to do with a failure.

use std::time::Duration;

use ureq::Agent;

use crate::domain::{Token, TokenProvider};
use crate::errors::{AuthKeeperError, Result};
use crate::vault::Client;

/// Default request timeout for the token endpoint.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Token provider backed by a `ureq` agent.
pub struct OAuthProvider {
    agent: Agent,
}

impl OAuthProvider {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            // Non-2xx bodies carry the server's error description.
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for OAuthProvider {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl TokenProvider for OAuthProvider {
    fn fetch_token(&self, client: &Client) -> Result<Token> {
        let form = token_request_form(client);
        tracing::debug!(url = %client.token_url, client = %client.name, "sending token request");

        let mut response = self
            .agent
            .post(client.token_url.as_str())
            .header("Accept", "application/json")
            .send_form(form.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| AuthKeeperError::Http(format!("failed to send request: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| AuthKeeperError::Http(format!("failed to read response: {e}")))?;
        tracing::debug!(status, "token endpoint responded");

        if status != 200 {
            return Err(AuthKeeperError::TokenRequestFailed { status, body });
        }

        parse_token_response(&body)
    }
}

/// Form fields for a client-credentials request. `scope` is omitted when
/// the client has no scopes.
pub fn token_request_form(client: &Client) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("grant_type", "client_credentials".to_string()),
        ("client_id", client.client_id.clone()),
        ("client_secret", client.client_secret.clone()),
    ];
    if !client.scopes.is_empty() {
        form.push(("scope", client.scopes.join(" ")));
    }
    form
}

/// Parse a successful token endpoint body.
pub fn parse_token_response(body: &str) -> Result<Token> {
    serde_json::from_str(body).map_err(|e| AuthKeeperError::InvalidTokenResponse(e.to_string()))
}
