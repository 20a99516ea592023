//! Integration tests for the fingerprint store lifecycle.
//!
//! All tests run at the Low level so RSA keypair generation stays
//! cheap; the lifecycle logic is identical across levels.

use rsa::pkcs8::DecodePrivateKey;
use sitepass_core::SecurityLevel;
use sitepass_store::CredentialStore;
use tempfile::TempDir;

fn fresh_store(tmp: &TempDir) -> CredentialStore {
    CredentialStore::new(tmp.path(), SecurityLevel::Low)
}

#[test]
fn round_trip_and_negative_lookup() {
    let tmp = TempDir::new().unwrap();
    let store = fresh_store(&tmp);

    let fp = store.fingerprint(b"alice", b"hunter2").unwrap();
    assert!(!store.contains(&fp).unwrap());

    store.record(&fp).unwrap();
    assert!(store.contains(&fp).unwrap());

    let other = store.fingerprint(b"alice", b"hunter3").unwrap();
    assert_ne!(fp, other);
    assert!(!store.contains(&other).unwrap());
}

#[test]
fn fingerprints_are_deterministic_across_store_instances() {
    let tmp = TempDir::new().unwrap();

    let first = fresh_store(&tmp).fingerprint(b"bob", b"pass").unwrap();
    let second = fresh_store(&tmp).fingerprint(b"bob", b"pass").unwrap();

    assert_eq!(first, second);
}

#[test]
fn contains_on_a_missing_store_is_false() {
    let tmp = TempDir::new().unwrap();
    let store = fresh_store(&tmp);
    assert!(!store.contains("anything").unwrap());
    assert!(!store.store_path().exists());
}

#[test]
fn corrupted_key_invalidates_the_store_pair() {
    let tmp = TempDir::new().unwrap();
    let store = fresh_store(&tmp);

    let fp = store.fingerprint(b"carol", b"secret").unwrap();
    store.record(&fp).unwrap();
    assert!(store.contains(&fp).unwrap());

    std::fs::write(store.key_path(), b"not a key").unwrap();

    // Requesting the key recovers by recreating both files together.
    store.public_key().unwrap();
    assert!(store.key_path().exists());
    assert!(store.store_path().exists());
    assert_eq!(std::fs::read(store.store_path()).unwrap().len(), 0);
    assert!(!store.contains(&fp).unwrap());

    // A fresh keypair seals the same credentials differently.
    let refreshed = store.fingerprint(b"carol", b"secret").unwrap();
    assert_ne!(fp, refreshed);
}

#[test]
fn key_survives_reload_without_regeneration() {
    let tmp = TempDir::new().unwrap();

    let fp = fresh_store(&tmp).fingerprint(b"dave", b"pw").unwrap();
    fresh_store(&tmp).record(&fp).unwrap();

    // Same key on disk, so the same fingerprint is found again.
    assert!(fresh_store(&tmp).contains(&fp).unwrap());
    let again = fresh_store(&tmp).fingerprint(b"dave", b"pw").unwrap();
    assert_eq!(fp, again);
}

#[test]
fn key_file_holds_no_private_material() {
    let tmp = TempDir::new().unwrap();
    let store = fresh_store(&tmp);
    store.public_key().unwrap();

    let bytes = std::fs::read(store.key_path()).unwrap();
    assert!(rsa::RsaPrivateKey::from_pkcs8_der(&bytes).is_err());
}

#[test]
fn fingerprint_depends_on_both_inputs() {
    let tmp = TempDir::new().unwrap();
    let store = fresh_store(&tmp);

    let base = store.fingerprint(b"erin", b"pw").unwrap();
    assert_ne!(base, store.fingerprint(b"erin", b"pw2").unwrap());
    assert_ne!(base, store.fingerprint(b"frank", b"pw").unwrap());
}
