//! sitepass-store: credential fingerprint storage
//!
//! Answers "has this (username, password) pair been used before"
//! without storing plaintext. Fingerprints are salted SHA3-256 digests
//! sealed with raw (unpadded) RSA under a per-level public key whose
//! private half is discarded at generation time — the store can write
//! fingerprints it can never open again.
//!
//! Deterministic encryption (same credentials + key = same fingerprint)
//! is required here because membership is checked by string equality.
//! This is intentional; switching to randomized padding would silently
//! break every lookup. The store is typo error-correction, not a
//! credential vault.

mod fingerprint;
mod keyfile;
mod store;

pub use fingerprint::fingerprint_with_key;

use std::path::PathBuf;

use sitepass_core::SecurityLevel;

/// Per-level fingerprint store rooted at a data directory.
///
/// Each security level owns two files: a public-key file and an
/// append-only hash file. The pair is created and invalidated
/// together so stored fingerprints are never orphaned against a key
/// they were not sealed with.
pub struct CredentialStore {
    data_dir: PathBuf,
    level: SecurityLevel,
}

impl CredentialStore {
    pub fn new(data_dir: impl Into<PathBuf>, level: SecurityLevel) -> Self {
        Self {
            data_dir: data_dir.into(),
            level,
        }
    }

    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    /// Path of the SPKI DER public-key file for this level.
    pub fn key_path(&self) -> PathBuf {
        self.data_dir.join(format!("pubkey_{}.der", self.level))
    }

    /// Path of the newline-delimited fingerprint file for this level.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(format!("hashes_{}.dat", self.level))
    }
}
