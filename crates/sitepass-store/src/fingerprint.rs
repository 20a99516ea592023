//! Credential fingerprinting: salted digest sealed with raw RSA

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};
use sha3::{Digest, Sha3_256};
use sitepass_core::SecurityLevel;
use sitepass_crypto::{expand, shuffle, SeedRng};

use crate::CredentialStore;

impl CredentialStore {
    /// Fingerprint a (username, password) pair.
    ///
    /// Loads (or lazily creates) the level's public key, then defers to
    /// [`fingerprint_with_key`]. Identical credentials always produce
    /// the identical string, which is what makes membership lookup by
    /// equality possible.
    pub fn fingerprint(&self, username: &[u8], password: &[u8]) -> Result<String> {
        let key = self.public_key()?;
        Ok(fingerprint_with_key(&key, self.level, username, password))
    }
}

/// Deterministic fingerprint of (username, password) under `key`.
///
/// A salt is expanded from the username at the level's salt width and a
/// filler buffer from the password; each is then shuffled by a
/// generator seeded from the other (captured before either shuffle
/// runs), so neither permutation can be predicted from its own buffer
/// alone. The digest is SHA3-256 over the password followed by the
/// shuffled salt; the shuffled filler is discarded and never reaches
/// the digest.
pub fn fingerprint_with_key(
    key: &RsaPublicKey,
    level: SecurityLevel,
    username: &[u8],
    password: &[u8],
) -> String {
    let mut salt = expand(username, level.salt_len());
    let mut filler = expand(password, 256);

    let salt_before_shuffle = salt.clone();
    shuffle(&mut salt, &mut SeedRng::from_seed_bytes(&filler));
    shuffle(&mut filler, &mut SeedRng::from_seed_bytes(&salt_before_shuffle));

    let mut hasher = Sha3_256::new();
    hasher.update(password);
    hasher.update(&salt);
    let digest = hasher.finalize();

    BASE64.encode(seal(key, &digest))
}

/// Raw RSA: `m^e mod n`, left-padded to the modulus width.
///
/// Unpadded on purpose. Fingerprints are looked up by string equality,
/// so the ciphertext for a given digest must be repeatable; randomized
/// padding would break every lookup. The digest is far below the
/// modulus width at every level, so the message is always reducible.
fn seal(key: &RsaPublicKey, message: &[u8]) -> Vec<u8> {
    let m = BigUint::from_bytes_be(message);
    let c = m.modpow(key.e(), key.n());
    let bytes = c.to_bytes_be();
    let width = key.size();

    let mut out = vec![0u8; width.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}
