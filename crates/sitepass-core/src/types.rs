use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SitepassError;

/// Security tier for the credential store.
///
/// Each level fixes the RSA modulus size used to encrypt stored
/// fingerprints and the salt length mixed into them. The level is part
/// of the on-disk addressing: every level owns its own key file and
/// hash file, so switching levels never invalidates another level's
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Keeps fingerprints out of plain sight, not much more.
    Low,
    /// Reasonable speed/security trade-off for everyday use.
    Medium,
    /// Strong protection with a noticeable first-time key cost.
    High,
    /// Key generation measured in hours.
    Overkill,
    /// Key generation with no practical upper bound.
    Crazy,
}

impl SecurityLevel {
    /// RSA modulus size in bits for this level's keypair.
    pub fn rsa_bits(self) -> usize {
        match self {
            SecurityLevel::Low => 1024,
            SecurityLevel::Medium => 4096,
            SecurityLevel::High => 16384,
            SecurityLevel::Overkill => 65536,
            SecurityLevel::Crazy => 1_048_576,
        }
    }

    /// Salt length in bytes mixed into fingerprints at this level.
    pub fn salt_len(self) -> usize {
        match self {
            SecurityLevel::Low => 16,
            SecurityLevel::Medium => 64,
            SecurityLevel::High => 256,
            SecurityLevel::Overkill => 1024,
            SecurityLevel::Crazy => 12384,
        }
    }

    /// Lowercase name used in file names and config values.
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityLevel::Low => "low",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
            SecurityLevel::Overkill => "overkill",
            SecurityLevel::Crazy => "crazy",
        }
    }

    pub fn all() -> [SecurityLevel; 5] {
        [
            SecurityLevel::Low,
            SecurityLevel::Medium,
            SecurityLevel::High,
            SecurityLevel::Overkill,
            SecurityLevel::Crazy,
        ]
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityLevel {
    type Err = SitepassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SecurityLevel::Low),
            "medium" => Ok(SecurityLevel::Medium),
            "high" => Ok(SecurityLevel::High),
            "overkill" => Ok(SecurityLevel::Overkill),
            "crazy" => Ok(SecurityLevel::Crazy),
            other => Err(SitepassError::UnknownLevel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<SecurityLevel>().unwrap(), SecurityLevel::High);
        assert_eq!(" low ".parse::<SecurityLevel>().unwrap(), SecurityLevel::Low);
        assert_eq!(
            "Overkill".parse::<SecurityLevel>().unwrap(),
            SecurityLevel::Overkill
        );
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!("paranoid".parse::<SecurityLevel>().is_err());
        assert!("".parse::<SecurityLevel>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for level in SecurityLevel::all() {
            assert_eq!(level.to_string().parse::<SecurityLevel>().unwrap(), level);
        }
    }

    #[test]
    fn levels_grow_monotonically() {
        let levels = SecurityLevel::all();
        for pair in levels.windows(2) {
            assert!(pair[0].rsa_bits() < pair[1].rsa_bits());
            assert!(pair[0].salt_len() < pair[1].salt_len());
        }
    }
}
