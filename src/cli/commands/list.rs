//! `authkeeper list` — display all clients in a table.

use crate::cli::output;
use crate::cli::{build_service, unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let service = build_service(cli)?;
    let session = unlock(&service)?;

    let clients = service.get_all(&session)?;

    output::info(&format!(
        "{} — {} client(s)",
        service.repository().path().display(),
        clients.len()
    ));

    output::print_clients_table(&clients);

    Ok(())
}
