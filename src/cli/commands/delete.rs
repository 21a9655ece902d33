//! `authkeeper delete` — remove a client from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{build_service, select_name, unlock, Cli};
use crate::errors::{AuthKeeperError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: Option<&str>, force: bool) -> Result<()> {
    let service = build_service(cli)?;
    let session = unlock(&service)?;

    let name = match name {
        Some(n) => n.to_string(),
        None => {
            let names = service.list(&session)?;
            if names.is_empty() {
                output::warning("No clients found in vault.");
                return Ok(());
            }
            select_name("Select client to delete", &names)?
        }
    };

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete client '{name}'? This cannot be undone."))
            .default(false)
            .interact()
            .map_err(|e| AuthKeeperError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    service.delete(&session, &name)?;
    output::success(&format!("Deleted client '{name}'"));

    Ok(())
}
