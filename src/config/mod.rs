//! User configuration.

pub mod settings;

pub use settings::{default_config_dir, Settings};
