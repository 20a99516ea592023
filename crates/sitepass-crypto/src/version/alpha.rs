use anyhow::Result;

use super::legacy::{b64_text, fold_key, mash_text, mash_username, site_seed};
use super::PasswordVersion;
use crate::deriver::encrypt_aes_b64;
use crate::expand::SeedRng;
use crate::mix::permute;
use crate::PASSWORD_LEN;

/// The first released version: seeded character mash, AES-ECB, a
/// resampling pass down to 32 characters, and a final seeded scramble.
pub struct Alpha;

impl PasswordVersion for Alpha {
    fn name(&self) -> &'static str {
        "ALPHA"
    }

    fn generate(&self, secret: &[u8], site: &[u8], username: &[u8]) -> Result<Vec<u8>> {
        let site = b64_text(site);
        let username = b64_text(username);
        let secret = b64_text(secret);

        let mash = mash_username(site_seed(&site), &username);
        let key = fold_key(secret.as_bytes());
        let mut text = encrypt_aes_b64(mash_text(&mash).as_bytes(), &key)?;

        resize(&mut text);
        scramble(&mut text);
        Ok(text)
    }
}

/// Delete characters at √53-stepped positions until 32 remain.
fn resize(text: &mut Vec<u8>) {
    let ratio = 53_f64.sqrt();
    let mut last = 0.0_f64;
    while text.len() > PASSWORD_LEN {
        last += ratio;
        last %= text.len() as f64;
        text.remove(last as usize);
    }
}

/// Final permutation keyed from two fixed character positions.
/// `text` is always at least one base64-encoded AES block (24 bytes),
/// so both probes are in range.
fn scramble(text: &mut [u8]) {
    let lo = u64::from(text[text.len() - 6]);
    let hi = u64::from(text[15]);
    let seed = (hi << 32) | lo;
    let mut rng = SeedRng::from_seed_bytes(&seed.to_be_bytes());
    permute(text, &mut rng);
}
