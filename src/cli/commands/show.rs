//! `authkeeper show` — print one client's details.

use crate::cli::output;
use crate::cli::{build_service, unlock, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, name: &str, reveal: bool) -> Result<()> {
    let service = build_service(cli)?;
    let session = unlock(&service)?;

    let client = service.get(&session, name)?;
    output::print_client_details(&client, reveal);

    if !reveal {
        output::tip("Pass --reveal to print the client secret.");
    }

    Ok(())
}
