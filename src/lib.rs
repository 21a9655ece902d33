pub mod cli;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod provider;
pub mod vault;
