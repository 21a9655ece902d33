//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::domain::Token;
use crate::vault::Client;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Replace every character of a secret with a bullet.
pub fn mask(secret: &str) -> String {
    "\u{2022}".repeat(secret.chars().count())
}

fn format_created(client: &Client) -> String {
    client
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Print a table of clients (Name, Client ID, Token URL, Scopes, Created).
pub fn print_clients_table(clients: &[Client]) {
    if clients.is_empty() {
        info("No clients in this vault yet.");
        tip("Run `authkeeper add` to add your first client.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Client ID", "Token URL", "Scopes", "Created"]);

    for c in clients {
        table.add_row(vec![
            c.name.clone(),
            c.client_id.clone(),
            c.token_url.clone(),
            c.scopes.join(" "),
            format_created(c),
        ]);
    }

    println!("{table}");
}

/// Print a single client. The secret is masked unless `reveal` is set.
pub fn print_client_details(client: &Client, reveal: bool) {
    let secret = if reveal {
        client.client_secret.clone()
    } else {
        mask(&client.client_secret)
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Name".to_string(), client.name.clone()]);
    table.add_row(vec!["Client ID".to_string(), client.client_id.clone()]);
    table.add_row(vec!["Client Secret".to_string(), secret]);
    table.add_row(vec!["Token URL".to_string(), client.token_url.clone()]);
    table.add_row(vec!["Scopes".to_string(), client.scopes.join(" ")]);
    table.add_row(vec!["Created".to_string(), format_created(client)]);

    println!("{table}");
}

/// Print an issued token.
pub fn print_token(token: &Token) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Access Token".to_string(), token.access_token.clone()]);
    table.add_row(vec!["Token Type".to_string(), token.token_type.clone()]);
    table.add_row(vec![
        "Expires In".to_string(),
        format!("{} seconds", token.expires_in),
    ]);
    table.add_row(vec!["Scope".to_string(), token.scope.clone()]);

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_hides_every_character() {
        assert_eq!(mask("abc"), "\u{2022}\u{2022}\u{2022}");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn mask_counts_characters_not_bytes() {
        assert_eq!(mask("é").chars().count(), 1);
    }
}
