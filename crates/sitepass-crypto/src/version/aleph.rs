use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::PasswordVersion;
use crate::deriver::{digest_with_salt, encrypt_aes_b64, salted_key};
use crate::expand::expand;
use crate::mix::xor_pad;
use crate::{AES_KEY_LEN, EXPANDED_INPUT_LEN, PASSWORD_LEN};

/// The current version: every input expanded to 256 bytes, two salted
/// derivation towers keyed on the username, an AES round over the
/// expanded username, and a final salted digest truncated to 32 base64
/// characters.
pub struct Aleph;

impl PasswordVersion for Aleph {
    fn name(&self) -> &'static str {
        "ALEPH"
    }

    fn generate(&self, secret: &[u8], site: &[u8], username: &[u8]) -> Result<Vec<u8>> {
        let secret = expand(secret, EXPANDED_INPUT_LEN);
        let site = expand(site, EXPANDED_INPUT_LEN);
        let username = expand(username, EXPANDED_INPUT_LEN);

        let stage = salted_key(&site, &secret)?;
        let stage = salted_key(&username, &stage)?;

        let sealed = encrypt_aes_b64(&username, &expand(&stage, AES_KEY_LEN))?;
        let stage = salted_key(&username, &sealed)?;

        let digest = digest_with_salt(&stage, &xor_pad(&secret, &username));
        let encoded = BASE64.encode(digest);
        Ok(encoded.as_bytes()[..PASSWORD_LEN].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_triple_is_stable_and_32_wide() {
        let a = Aleph
            .generate(b"s3cret", b"example.com", b"alice")
            .unwrap();
        let b = Aleph
            .generate(b"s3cret", b"example.com", b"alice")
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), PASSWORD_LEN);
        assert!(a.iter().all(|&c| {
            c.is_ascii_alphanumeric() || c == b'+' || c == b'/' || c == b'='
        }));
    }

    #[test]
    fn each_input_influences_the_output() {
        let base = Aleph.generate(b"pw", b"site", b"user").unwrap();
        assert_ne!(base, Aleph.generate(b"pw2", b"site", b"user").unwrap());
        assert_ne!(base, Aleph.generate(b"pw", b"site2", b"user").unwrap());
        assert_ne!(base, Aleph.generate(b"pw", b"site", b"user2").unwrap());
    }

    #[test]
    fn empty_inputs_are_valid_and_distinct() {
        let empty = Aleph.generate(b"", b"", b"").unwrap();
        assert_eq!(empty.len(), PASSWORD_LEN);
        assert_ne!(empty, Aleph.generate(b"x", b"", b"").unwrap());
    }
}
