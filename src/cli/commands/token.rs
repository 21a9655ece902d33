//! `authkeeper token` — exchange a stored client's credentials for an
//! access token.

use crate::cli::output;
use crate::cli::{build_service, select_name, unlock, Cli};
use crate::errors::Result;

/// Execute the `token` command.
pub fn execute(cli: &Cli, name: Option<&str>, raw: bool) -> Result<()> {
    let service = build_service(cli)?;
    let session = unlock(&service)?;

    let name = match name {
        Some(n) => n.to_string(),
        None => {
            let names = service.list(&session)?;
            if names.is_empty() {
                output::warning("No clients found in vault.");
                output::tip("Run `authkeeper add` to add your first client.");
                return Ok(());
            }
            select_name("Select OAuth2 client", &names)?
        }
    };

    let token = service.issue_token(&session, &name)?;

    // Raw mode is meant for `$(authkeeper token svc --raw)`.
    if raw {
        println!("{}", token.access_token);
        return Ok(());
    }

    output::success(&format!("Token issued for '{name}'"));
    output::print_token(&token);
    output::tip("Use --raw to print only the access token.");

    Ok(())
}
