//! Seeded expansion: arbitrary bytes → reproducible pseudo-random bytes

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha3::{Digest, Sha3_256};

/// A deterministic random source seeded from arbitrary bytes.
///
/// The seed bytes are compressed to 32 bytes with SHA3-256 and drive a
/// ChaCha20 stream. Both the seed digest and the stream-to-value
/// mapping below are part of the password compatibility contract and
/// must never change.
pub struct SeedRng {
    inner: ChaCha20Rng,
}

impl SeedRng {
    pub fn from_seed_bytes(seed: &[u8]) -> Self {
        let digest: [u8; 32] = Sha3_256::digest(seed).into();
        Self {
            inner: ChaCha20Rng::from_seed(digest),
        }
    }

    /// Fill `buf` with the next bytes of the stream.
    pub fn fill(&mut self, buf: &mut [u8]) {
        self.inner.fill_bytes(buf);
    }

    /// Uniform value in `[0, bound)`. `bound` must be nonzero.
    ///
    /// Rejection sampling is implemented here rather than through
    /// `rand`'s distributions, which do not guarantee identical values
    /// across crate versions.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "next_below bound must be nonzero");
        let reject_window = (u32::MAX - bound + 1) % bound;
        loop {
            let v = self.inner.next_u32();
            if v <= u32::MAX - reject_window {
                return v % bound;
            }
        }
    }
}

/// Deterministically derive `len` pseudo-random bytes from `source`.
///
/// The same `(source, len)` pair yields the same bytes on any platform.
/// `len` may be zero or larger than `source.len()`.
pub fn expand(source: &[u8], len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    SeedRng::from_seed_bytes(source).fill(&mut out);
    out
}
