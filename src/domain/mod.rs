//! Domain layer: the credential service and the capabilities it needs.

pub mod ports;
pub mod service;

pub use ports::{Repository, Token, TokenProvider};
pub use service::CredentialService;
