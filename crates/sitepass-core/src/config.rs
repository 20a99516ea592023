use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SitepassError, SitepassResult};
use crate::types::SecurityLevel;

/// Top-level configuration (loaded from sitepass.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitepassConfig {
    pub oracle: OracleConfig,
    pub prompt: PromptConfig,
    pub output: OutputConfig,
    /// Log level (default: info)
    pub log_level: String,
}

/// Credential store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Whether to check and record credential fingerprints
    pub enabled: bool,
    /// Security tier: controls RSA modulus size and fingerprint salt length
    pub level: SecurityLevel,
    /// Directory holding the per-level key and hash files
    /// (default: platform data dir)
    pub data_dir: Option<PathBuf>,
}

/// Interactive prompting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Prompt for the site without echoing it
    pub site_sensitive: bool,
    /// Prompt for the username without echoing it
    pub username_sensitive: bool,
    /// Refuse to read the secret when stdin is not a terminal
    pub force_secure: bool,
}

/// Password output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Copy the derived password to the system clipboard
    pub clipboard: bool,
    /// Print the derived password to stdout
    pub echo: bool,
}

impl Default for SitepassConfig {
    fn default() -> Self {
        Self {
            oracle: OracleConfig::default(),
            prompt: PromptConfig::default(),
            output: OutputConfig::default(),
            log_level: "info".into(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: SecurityLevel::High,
            data_dir: None,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            site_sensitive: false,
            username_sensitive: false,
            force_secure: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clipboard: true,
            echo: true,
        }
    }
}

impl SitepassConfig {
    /// Load configuration from `path`, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> SitepassResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| {
                SitepassError::Config(format!("parsing {}: {e}", path.display()))
            })
        } else {
            tracing::warn!("config file not found: {}  (using defaults)", path.display());
            Ok(Self::default())
        }
    }

    /// Parse from a TOML string, filling unset fields with defaults.
    pub fn from_toml(content: &str) -> SitepassResult<Self> {
        toml::from_str(content).map_err(|e| SitepassError::Config(e.to_string()))
    }
}
