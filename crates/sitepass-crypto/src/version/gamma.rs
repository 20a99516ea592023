use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha3::{Digest, Sha3_512};

use super::legacy::{b64_text, fold_key, mash_text, mash_username, site_seed};
use super::PasswordVersion;
use crate::deriver::encrypt_aes_b64;
use crate::expand::SeedRng;
use crate::mix::{permute, xor_pad};
use crate::PASSWORD_LEN;

/// Successor to ALPHA: same mash stage, the mash text XOR-padded with
/// the secret before encryption, and a hash-and-reshuffle finalizer in
/// place of ALPHA's resample/scramble pair.
pub struct Gamma;

impl PasswordVersion for Gamma {
    fn name(&self) -> &'static str {
        "GAMMA"
    }

    fn generate(&self, secret: &[u8], site: &[u8], username: &[u8]) -> Result<Vec<u8>> {
        let site = b64_text(site);
        let username = b64_text(username);
        let secret = b64_text(secret);

        let mash = mash_username(site_seed(&site), &username);
        let data = xor_pad(mash_text(&mash).as_bytes(), secret.as_bytes());
        let sealed = encrypt_aes_b64(&data, &fold_key(secret.as_bytes()))?;

        Ok(finalize(&sealed))
    }
}

/// SHA3-512 the sealed text, fold the digest into a PRNG seed, permute
/// the base64 rendering of the digest, and keep the first 32 bytes.
fn finalize(sealed: &[u8]) -> Vec<u8> {
    let digest = Sha3_512::digest(sealed);

    let mut seed: u64 = 1;
    for &b in digest.iter() {
        seed = seed.wrapping_mul(u64::from(b)).wrapping_add(u64::from(b));
    }

    let mut encoded = BASE64.encode(digest).into_bytes();
    let mut rng = SeedRng::from_seed_bytes(&seed.to_be_bytes());
    permute(&mut encoded, &mut rng);
    encoded.truncate(PASSWORD_LEN);
    encoded
}
