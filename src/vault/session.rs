//! The unlocked-vault session handle.

use zeroize::Zeroizing;

/// Proof that a master password was supplied for this process session.
///
/// Obtained from `CredentialService::check_password` and passed to every
/// later call. The password is wiped from memory when the session drops.
pub struct Session {
    password: Zeroizing<String>,
}

impl Session {
    /// Wrap a master password. No check is performed here.
    pub fn new(password: impl Into<Zeroizing<String>>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// The raw password bytes, for key derivation.
    pub fn password(&self) -> &[u8] {
        self.password.as_bytes()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Session(..)")
    }
}
