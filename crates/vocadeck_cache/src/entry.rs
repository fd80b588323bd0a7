//! Cache entry types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A cache entry for a single vocabulary source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Source name (file stem or sheet name). Also the key in the store.
    pub source_name: String,

    /// Fingerprint of the row set the output was generated from.
    pub fingerprint: String,

    /// Path of the deck package produced by the last successful generation.
    pub output_path: PathBuf,

    /// Timestamp (seconds since the Unix epoch) of that generation.
    #[serde(default)]
    pub generated_at: u64,
}

impl CacheEntry {
    /// Creates a new cache entry stamped with the current time.
    pub fn new(
        source_name: impl Into<String>,
        fingerprint: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            fingerprint: fingerprint.into(),
            output_path: output_path.into(),
            generated_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Checks whether this entry was recorded for the given fingerprint.
    pub fn matches(&self, fingerprint: &str) -> bool {
        self.fingerprint == fingerprint
    }

    /// Returns the recorded output path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
