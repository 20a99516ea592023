//! Building blocks shared by the first-generation versions.
//!
//! ALPHA and GAMMA predate the salted deriver: they work on base64
//! renderings of the inputs and mash character codes through seeded
//! PRNGs. Kept bit-for-bit stable so passwords generated under those
//! versions remain reproducible.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::expand::SeedRng;
use crate::AES_KEY_LEN;

/// Base64 rendering used to normalize raw inputs into ASCII text.
pub(super) fn b64_text(input: &[u8]) -> String {
    BASE64.encode(input)
}

/// Fold a site-seeded weighted character sum into a 64-bit value.
pub(super) fn site_seed(site: &str) -> i64 {
    let mut rng = SeedRng::from_seed_bytes(site.as_bytes());
    let mut value: i64 = 0;
    for ch in site.chars() {
        value = value.wrapping_add(ch as i64 * i64::from(rng.next_below(100)));
    }
    value
}

/// Mash username character codes against a PRNG seeded with `seed`,
/// keeping only products above 10.
pub(super) fn mash_username(seed: i64, username: &str) -> Vec<i64> {
    let mut rng = SeedRng::from_seed_bytes(&seed.to_be_bytes());
    let chars: Vec<char> = username.chars().collect();
    let mut mash = Vec::new();
    for i in 0..chars.len() {
        let k = i64::from(rng.next_below(i as u32 + 1)) * chars[chars.len() - 1 - i] as i64;
        if k > 10 {
            mash.push(k);
        }
    }
    mash
}

/// Decimal rendering of the mash, the plaintext both legacy versions
/// encrypt ("[12, 345, ...]").
pub(super) fn mash_text(mash: &[i64]) -> String {
    format!("{mash:?}")
}

/// Fold arbitrary text into a 32-byte AES key with wrapping adds.
/// Positions past the key width get scaled by √52567 before folding.
pub(super) fn fold_key(text: &[u8]) -> [u8; AES_KEY_LEN] {
    let mut key = [0u8; AES_KEY_LEN];
    for (i, &b) in text.iter().enumerate() {
        let v = if i > AES_KEY_LEN {
            (f64::from(b) * 52567_f64.sqrt()) as i64 as u8
        } else {
            b
        };
        key[i % AES_KEY_LEN] = key[i % AES_KEY_LEN].wrapping_add(v);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_seed_is_deterministic() {
        assert_eq!(site_seed("ZXhhbXBsZQ=="), site_seed("ZXhhbXBsZQ=="));
        assert_ne!(site_seed("ZXhhbXBsZQ=="), site_seed("b3RoZXI="));
    }

    #[test]
    fn mash_text_renders_bracketed_decimals() {
        assert_eq!(mash_text(&[]), "[]");
        assert_eq!(mash_text(&[12, 345]), "[12, 345]");
    }

    #[test]
    fn fold_key_handles_long_and_empty_text() {
        assert_eq!(fold_key(b""), [0u8; AES_KEY_LEN]);
        let long = b64_text(&[7u8; 90]);
        let key = fold_key(long.as_bytes());
        assert_eq!(key, fold_key(long.as_bytes()));
    }
}
