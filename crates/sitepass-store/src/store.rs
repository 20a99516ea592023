//! Append-only fingerprint file: one base64 string per line

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};

use anyhow::{Context, Result};

use crate::CredentialStore;

impl CredentialStore {
    /// Whether `fingerprint` is already recorded. A missing store file
    /// means no.
    pub fn contains(&self, fingerprint: &str) -> Result<bool> {
        let path = self.store_path();
        if !path.exists() {
            return Ok(false);
        }
        let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            if line? == fingerprint {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Append `fingerprint` as a new line.
    ///
    /// Assumes the caller already checked non-membership; duplicates
    /// are not detected here.
    pub fn record(&self, fingerprint: &str) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("creating {}", self.data_dir.display()))?;
        let path = self.store_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        writeln!(file, "{fingerprint}")?;
        Ok(())
    }
}
