//! One module per subcommand. Each exposes an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod list;
pub mod show;
pub mod token;
