//! Integration tests for the on-disk vault store.

use std::fs;

use authkeeper::errors::AuthKeeperError;
use authkeeper::vault::{Client, Session, VaultDocument, VaultStore};
use chrono::Utc;
use tempfile::TempDir;

/// Helper: create a vault store inside a fresh temp dir.
fn store() -> (TempDir, VaultStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = VaultStore::new(dir.path().join(".authkeeper").join("vault.enc"));
    (dir, store)
}

fn session(pw: &str) -> Session {
    Session::new(pw.to_string())
}

fn document(names: &[&str]) -> VaultDocument {
    VaultDocument {
        clients: names
            .iter()
            .map(|n| {
                let mut c = Client::new(*n, "cid", "csec", "https://ex.com/token")
                    .with_scopes(["read", "write"]);
                c.created_at = Some(Utc::now());
                c
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[test]
fn load_missing_file_is_empty_for_any_password() {
    let (_dir, store) = store();
    assert!(!store.exists());

    for pw in ["", "a", "correct-password", "wrong-password"] {
        let doc = store.load(&session(pw)).expect("load missing vault");
        assert!(doc.is_empty());
    }
}

#[test]
fn load_zero_length_file_is_empty_for_any_password() {
    let (_dir, store) = store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), b"").unwrap();
    assert!(store.exists());
    assert!(!store.has_content());

    for pw in ["x", "correct-password"] {
        assert!(store.load(&session(pw)).unwrap().is_empty());
    }
}

#[test]
fn has_content_tracks_first_save() {
    let (_dir, store) = store();
    assert!(!store.has_content());

    store.save(&document(&["a"]), &session("pw")).unwrap();
    assert!(store.has_content());
}

// ---------------------------------------------------------------------------
// Save / load round-trip
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_roundtrips_in_order() {
    let (_dir, store) = store();
    let pw = session("roundtrip-pw");

    let doc = document(&["c", "a", "b"]);
    store.save(&doc, &pw).unwrap();
    assert!(store.exists());

    let loaded = store.load(&pw).unwrap();
    assert_eq!(loaded, doc);
    assert_eq!(loaded.names(), vec!["c", "a", "b"]);
}

#[test]
fn each_save_produces_a_fresh_blob() {
    let (_dir, store) = store();
    let pw = session("fresh-pw");
    let doc = document(&["svc"]);

    store.save(&doc, &pw).unwrap();
    let first = fs::read(store.path()).unwrap();
    store.save(&doc, &pw).unwrap();
    let second = fs::read(store.path()).unwrap();

    assert_ne!(first, second, "same content must re-encrypt with new salt/nonce");
    assert_eq!(store.load(&pw).unwrap(), doc);
}

#[test]
fn file_is_not_plaintext() {
    let (_dir, store) = store();
    store.save(&document(&["svc"]), &session("pw")).unwrap();

    let raw = fs::read(store.path()).unwrap();
    let haystack = String::from_utf8_lossy(&raw);
    assert!(!haystack.contains("csec"));
    assert!(!haystack.contains("clients"));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_is_reported_as_wrong_or_corrupt() {
    let (_dir, store) = store();
    store
        .save(&document(&["svc1"]), &session("correct-password"))
        .unwrap();

    let result = store.load(&session("wrong-password"));
    assert!(matches!(result, Err(AuthKeeperError::WrongPasswordOrCorrupt)));
}

#[test]
fn tampered_file_is_reported_as_wrong_or_corrupt() {
    let (_dir, store) = store();
    store.save(&document(&["svc"]), &session("pw")).unwrap();

    let mut data = fs::read(store.path()).unwrap();
    let mid = data.len() / 2;
    data[mid] ^= 0xFF;
    fs::write(store.path(), &data).unwrap();

    let result = store.load(&session("pw"));
    assert!(matches!(result, Err(AuthKeeperError::WrongPasswordOrCorrupt)));
}

#[test]
fn truncated_file_is_reported_as_wrong_or_corrupt() {
    let (_dir, store) = store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), [0u8; 7]).unwrap();

    let result = store.load(&session("pw"));
    assert!(matches!(result, Err(AuthKeeperError::WrongPasswordOrCorrupt)));
}

#[test]
fn authenticated_non_document_is_corrupt_vault() {
    let (_dir, store) = store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();

    // Valid ciphertext under the right password, but not a vault document.
    let blob = authkeeper::crypto::encrypt(b"not a json document", b"pw").unwrap();
    fs::write(store.path(), blob).unwrap();

    let result = store.load(&session("pw"));
    assert!(matches!(result, Err(AuthKeeperError::CorruptVault(_))));
}

// ---------------------------------------------------------------------------
// Permissions and atomicity
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn vault_file_and_directory_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = store();
    store.save(&document(&["svc"]), &session("pw")).unwrap();

    let file_mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
    let dir_mode = fs::metadata(store.path().parent().unwrap())
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(file_mode, 0o600);
    assert_eq!(dir_mode, 0o700);
}

#[test]
fn no_temp_file_left_behind() {
    let (_dir, store) = store();
    store.save(&document(&["svc"]), &session("pw")).unwrap();

    let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["vault.enc"]);
}

// ---------------------------------------------------------------------------
// Multi-process behaviour: last writer wins
// ---------------------------------------------------------------------------

#[test]
fn stale_writer_overwrites_concurrent_changes() {
    let (_dir, store) = store();
    let pw = session("pw");
    store.save(&document(&["base"]), &pw).unwrap();

    // Two handles (as two processes would) load the same state...
    let other = VaultStore::new(store.path());
    let mut first = store.load(&pw).unwrap();
    let mut second = other.load(&pw).unwrap();

    // ...each appends a different client and saves.
    first.clients.extend(document(&["from-first"]).clients);
    store.save(&first, &pw).unwrap();
    second.clients.extend(document(&["from-second"]).clients);
    other.save(&second, &pw).unwrap();

    // No locking: the second save silently drops the first one's change.
    assert_eq!(store.load(&pw).unwrap().names(), vec!["base", "from-second"]);
}
