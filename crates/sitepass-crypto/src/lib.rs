//! sitepass-crypto: deterministic password derivation
//!
//! Pipeline: (secret, site, username) → seeded expansion → XOR/shuffle
//! mixing → salted key derivation (AES-CBC + SHA3-384) → version-specific
//! composition → fixed-width password bytes
//!
//! Every stage is a pure function of its inputs: all randomness is drawn
//! from PRNGs seeded with caller-supplied bytes, so a given algorithm
//! version maps a given input triple to the same password forever. That
//! mapping is the compatibility contract — released versions are never
//! modified, behavior changes ship as a new named version in the
//! registry.

pub mod deriver;
pub mod expand;
pub mod mix;
pub mod version;

pub use expand::{expand, SeedRng};
pub use mix::{permute, shuffle, xor_pad};
pub use version::{PasswordVersion, VersionRegistry};

/// Width inputs are expanded to before entering a version pipeline
pub const EXPANDED_INPUT_LEN: usize = 256;

/// AES-256 key width
pub const AES_KEY_LEN: usize = 32;

/// AES block width, also the CBC IV width
pub const AES_BLOCK_LEN: usize = 16;

/// SHA3-384 digest width, the salted deriver's output size
pub const DIGEST_LEN: usize = 48;

/// Password width produced by the built-in versions
pub const PASSWORD_LEN: usize = 32;
