//! Per-level keypair lifecycle: load, validate, regenerate

use std::path::Path;

use anyhow::{Context, Result};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sitepass_core::SecurityLevel;
use tracing::{info, warn};

use crate::CredentialStore;

impl CredentialStore {
    /// The public key fingerprints are sealed with at this level.
    ///
    /// A persisted key is reused only if it parses and its modulus
    /// matches the level's size. Anything else counts as an integrity
    /// failure: the key file and the hash file are discarded together
    /// and a fresh keypair is generated. Generation is the single
    /// operation in sitepass that consumes OS entropy.
    pub fn public_key(&self) -> Result<RsaPublicKey> {
        let key_path = self.key_path();
        if key_path.exists() {
            match self.load_valid_key(&key_path) {
                Ok(key) => return Ok(key),
                Err(reason) => warn!(
                    path = %key_path.display(),
                    %reason,
                    "stored fingerprint key rejected; regenerating key and hash store"
                ),
            }
        } else {
            info!(
                level = %self.level,
                "no fingerprint key found; generating one"
            );
        }
        self.regenerate()
    }

    fn load_valid_key(&self, path: &Path) -> Result<RsaPublicKey> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let key = RsaPublicKey::from_public_key_der(&bytes)
            .map_err(|e| anyhow::anyhow!("parsing public key: {e}"))?;
        let bits = key.n().bits();
        anyhow::ensure!(
            bits == self.level.rsa_bits(),
            "modulus is {bits} bits, level {} requires {}",
            self.level,
            self.level.rsa_bits()
        );
        Ok(key)
    }

    fn regenerate(&self) -> Result<RsaPublicKey> {
        // The key and hash files are only ever valid as a pair.
        remove_if_present(&self.key_path())?;
        remove_if_present(&self.store_path())?;
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("creating {}", self.data_dir.display()))?;

        let bits = self.level.rsa_bits();
        info!(
            level = %self.level,
            bits,
            "generating fingerprint keypair; this happens once per level"
        );
        if let Some(notice) = generation_notice(self.level) {
            info!("{notice}");
        }

        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, bits)
            .with_context(|| format!("generating {bits}-bit RSA keypair"))?;
        let public = RsaPublicKey::from(&private);
        // The private half goes out of scope here and is never
        // persisted or returned by any operation.
        drop(private);

        let der = public
            .to_public_key_der()
            .map_err(|e| anyhow::anyhow!("encoding public key: {e}"))?;
        std::fs::write(self.key_path(), der.as_bytes())
            .with_context(|| format!("writing {}", self.key_path().display()))?;
        std::fs::write(self.store_path(), b"")
            .with_context(|| format!("writing {}", self.store_path().display()))?;

        Ok(public)
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
}

fn generation_notice(level: SecurityLevel) -> Option<&'static str> {
    match level {
        SecurityLevel::Low => None,
        SecurityLevel::Medium => Some("this can take a few seconds"),
        SecurityLevel::High => Some("this can take several minutes depending on hardware"),
        SecurityLevel::Overkill => {
            Some("this can take hours; consider a lower level or an externally generated key")
        }
        SecurityLevel::Crazy => Some("generation time at this level has no practical bound"),
    }
}
