//! `authkeeper add` — store a new OAuth2 client in the vault.
//!
//! Creates the vault on first use. Any field not given as a flag is
//! prompted for; the secret prompt is hidden.

use dialoguer::{Confirm, Input};

use crate::cli::output;
use crate::cli::{build_service, prompt_new_password, prompt_password, Cli};
use crate::errors::{AuthKeeperError, Result};
use crate::vault::{parse_scopes, Client};

/// Field values taken from the command line.
#[derive(Default)]
pub struct AddArgs {
    pub name: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: Option<String>,
    pub scopes: Vec<String>,
    pub yes: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: AddArgs) -> Result<()> {
    let service = build_service(cli)?;

    // 1. Unlock (or create) the vault before asking for anything else.
    let password = if service.has_content() {
        prompt_password()?
    } else {
        prompt_new_password()?
    };
    let session = service.check_password(password)?;

    // 2. Collect the client fields.
    let interactive = args.name.is_none() || args.client_id.is_none() || args.token_url.is_none();

    let name = value_or_prompt(args.name, "Client name")?;
    let client_id = value_or_prompt(args.client_id, "Client ID")?;
    let client_secret = match args.client_secret {
        Some(secret) => {
            output::warning("Secret provided on command line — it may appear in shell history.");
            secret
        }
        None => dialoguer::Password::new()
            .with_prompt("Client secret")
            .interact()
            .map_err(|e| AuthKeeperError::CommandFailed(format!("input prompt: {e}")))?,
    };
    let token_url = value_or_prompt(args.token_url, "Token URL")?;

    let mut scopes: Vec<String> = args.scopes.iter().flat_map(|s| parse_scopes(s)).collect();
    if scopes.is_empty() && interactive {
        let line: String = Input::new()
            .with_prompt("Scopes (optional, space-separated)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AuthKeeperError::CommandFailed(format!("input prompt: {e}")))?;
        scopes = parse_scopes(&line);
    }

    let client = Client::new(name.clone(), client_id, client_secret, token_url).with_scopes(scopes);

    // 3. Review before writing.
    if !args.yes {
        output::info("Review client details:");
        output::print_client_details(&client, false);

        let confirmed = Confirm::new()
            .with_prompt("Save this client?")
            .default(true)
            .interact()
            .map_err(|e| AuthKeeperError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    // 4. Save.
    service.add(&session, client)?;

    output::success(&format!(
        "Client '{}' added to {}",
        name,
        service.repository().path().display()
    ));
    output::tip(&format!("Run `authkeeper token {name}` to issue an access token."));

    Ok(())
}

fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AuthKeeperError::CommandFailed(format!("input prompt: {e}"))),
    }
}
