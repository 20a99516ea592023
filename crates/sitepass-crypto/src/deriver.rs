//! Salted key derivation: the building block shared by every version

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cipher::block_padding::Pkcs7;
use cipher::{BlockEncryptMut, KeyInit, KeyIvInit};
use sha3::{Digest, Sha3_384};
use zeroize::Zeroize;

use crate::expand::{expand, SeedRng};
use crate::mix::{shuffle, xor_pad};
use crate::{AES_BLOCK_LEN, AES_KEY_LEN, DIGEST_LEN};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;

/// SHA3-384 over `salt` followed by `data`.
pub fn digest_with_salt(data: &[u8], salt: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha3_384::new();
    hasher.update(salt);
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a fixed-size salted key from a salt source and a secret source.
///
/// The chain: XOR-pad the secret with the salt, expand and shuffle an
/// IV from it, derive an AES key from the pad and the IV, CBC-encrypt a
/// salted digest of the pad, and hash the ciphertext salted with the
/// pad. The digest inputs swap roles between the two hashing steps, so
/// recovering one intermediate value is not enough to replay the other.
pub fn salted_key(salt_source: &[u8], secret_source: &[u8]) -> Result<[u8; DIGEST_LEN]> {
    let mut padded = xor_pad(secret_source, salt_source);

    let mut iv = expand(&padded, 256);
    let mut iv_rng = SeedRng::from_seed_bytes(&expand(salt_source, 2048));
    shuffle(&mut iv, &mut iv_rng);

    // The full 256-byte buffer feeds the key derivation; the cipher
    // itself only takes one block of it as IV.
    let mut key = expand(&xor_pad(&padded, &iv), AES_KEY_LEN);

    let digest = digest_with_salt(salt_source, &padded);

    let cipher = Aes256CbcEnc::new_from_slices(&key, &iv[..AES_BLOCK_LEN])
        .map_err(|e| anyhow::anyhow!("AES-CBC init: {e}"))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(&digest);

    let out = digest_with_salt(&padded, &ciphertext);
    key.zeroize();
    padded.zeroize();
    Ok(out)
}

/// AES-256-ECB encrypt `plaintext` under a 32-byte key and return the
/// ASCII bytes of the base64-encoded ciphertext.
///
/// Not suitable for long plaintext; version pipelines only feed it
/// short expanded buffers.
pub fn encrypt_aes_b64(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256EcbEnc::new_from_slice(key)
        .map_err(|e| anyhow::anyhow!("AES-ECB init: {e}"))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    Ok(BASE64.encode(ciphertext).into_bytes())
}
