//! Byte-buffer mixing: XOR padding and seeded permutations

use crate::expand::SeedRng;

/// XOR `data` against `key`, repeating the key cyclically.
///
/// Involution: applying the same key twice restores the input. An empty
/// key is the all-zero pad and leaves the data unchanged.
pub fn xor_pad(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, &b)| b ^ key[i % key.len()])
        .collect()
}

/// Shuffle `buf` in place using `rng`.
///
/// One full pass swaps every position with a uniformly random target,
/// then `min(n², 100·n)` extra random pairwise swaps are applied on
/// top. Deliberately over-mixed rather than a single Fisher–Yates
/// pass; reproducible for an identically seeded `rng`.
pub fn shuffle(buf: &mut [u8], rng: &mut SeedRng) {
    let n = buf.len();
    if n == 0 {
        return;
    }
    for current in 0..n {
        let other = rng.next_below(n as u32) as usize;
        buf.swap(current, other);
    }
    let extra = (n * n).min(n * 100);
    for _ in 0..extra {
        let a = rng.next_below(n as u32) as usize;
        let b = rng.next_below(n as u32) as usize;
        buf.swap(a, b);
    }
}

/// Permute `buf` in place with a single Fisher–Yates pass.
pub fn permute<T>(buf: &mut [T], rng: &mut SeedRng) {
    for i in (1..buf.len()).rev() {
        let j = rng.next_below(i as u32 + 1) as usize;
        buf.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn xor_pad_is_an_involution() {
        let data = b"some data to pad";
        let key = b"key";
        assert_eq!(xor_pad(&xor_pad(data, key), key), data);
    }

    #[test]
    fn xor_pad_empty_key_is_identity() {
        let data = b"untouched";
        assert_eq!(xor_pad(data, b""), data);
    }

    #[test]
    fn xor_pad_preserves_data_length() {
        assert_eq!(xor_pad(b"abcdef", b"0123456789").len(), 6);
        assert_eq!(xor_pad(b"", b"key").len(), 0);
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let mut a: Vec<u8> = (0..=255).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut SeedRng::from_seed_bytes(b"seed"));
        shuffle(&mut b, &mut SeedRng::from_seed_bytes(b"seed"));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_preserves_contents() {
        let mut buf: Vec<u8> = (0..=255).collect();
        shuffle(&mut buf, &mut SeedRng::from_seed_bytes(b"contents"));
        let mut sorted = buf.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..=255).collect::<Vec<u8>>());
    }

    #[test]
    fn shuffle_handles_tiny_buffers() {
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut SeedRng::from_seed_bytes(b"x"));
        let mut one = [7u8];
        shuffle(&mut one, &mut SeedRng::from_seed_bytes(b"x"));
        assert_eq!(one, [7]);
    }

    #[test]
    fn permute_is_deterministic_per_seed() {
        let mut a: Vec<u8> = (0..64).collect();
        let mut b = a.clone();
        permute(&mut a, &mut SeedRng::from_seed_bytes(b"fy"));
        permute(&mut b, &mut SeedRng::from_seed_bytes(b"fy"));
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<u8>>());
    }

    proptest! {
        #[test]
        fn xor_pad_involution_holds(
            data in proptest::collection::vec(any::<u8>(), 0..256),
            key in proptest::collection::vec(any::<u8>(), 1..64),
        ) {
            prop_assert_eq!(xor_pad(&xor_pad(&data, &key), &key), data);
        }
    }
}
