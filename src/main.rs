use authkeeper::cli::commands::add::AddArgs;
use authkeeper::cli::{Cli, Commands};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    authkeeper::logging::init();

    let result = match cli.command {
        Commands::Add {
            ref name,
            ref client_id,
            ref client_secret,
            ref token_url,
            ref scopes,
            yes,
        } => authkeeper::cli::commands::add::execute(
            &cli,
            AddArgs {
                name: name.clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                token_url: token_url.clone(),
                scopes: scopes.clone(),
                yes,
            },
        ),
        Commands::List => authkeeper::cli::commands::list::execute(&cli),
        Commands::Show { ref name, reveal } => {
            authkeeper::cli::commands::show::execute(&cli, name, reveal)
        }
        Commands::Token { ref name, raw } => {
            authkeeper::cli::commands::token::execute(&cli, name.as_deref(), raw)
        }
        Commands::Delete { ref name, force } => {
            authkeeper::cli::commands::delete::execute(&cli, name.as_deref(), force)
        }
        Commands::Completions { shell } => authkeeper::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        authkeeper::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
