//! Vault module — encrypted client storage.
//!
//! This module provides:
//! - The `Client` credential entry (`client`)
//! - The `Session` handle carrying the master password (`session`)
//! - Document serialization and atomic file writes (`format`)
//! - `VaultStore`, the whole-file load/save layer (`store`)

pub mod client;
pub mod format;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use client::{parse_scopes, Client};
pub use format::VaultDocument;
pub use session::Session;
pub use store::VaultStore;
