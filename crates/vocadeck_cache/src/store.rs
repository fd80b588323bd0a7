//! Persistent store of per-source generation state.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{CacheEntry, CacheError};

/// Version of the on-disk document layout.
pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct CacheDocumentRef<'a> {
    version: u32,
    entries: &'a BTreeMap<String, CacheEntry>,
}

#[derive(Deserialize)]
struct CacheDocument {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, CacheEntry>,
}

/// Outcome of comparing a source against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No entry exists for the source.
    Untracked,
    /// The stored fingerprint differs from the current one.
    Stale,
    /// Fingerprint matches but the output artifact is gone.
    MissingOutput,
    /// Fingerprint matches and the output artifact exists.
    Fresh,
}

impl CacheStatus {
    /// Returns whether generation must run for this status.
    pub fn should_regenerate(self) -> bool {
        !matches!(self, CacheStatus::Fresh)
    }

    /// Short label used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Untracked => "untracked",
            CacheStatus::Stale => "stale",
            CacheStatus::MissingOutput => "missing-output",
            CacheStatus::Fresh => "fresh",
        }
    }
}

/// Mapping of source name to [`CacheEntry`], backed by one JSON document.
#[derive(Debug)]
pub struct CacheStore {
    /// Location of the cache document.
    path: PathBuf,
    /// In-memory entries, ordered so the document diffs cleanly.
    entries: BTreeMap<String, CacheEntry>,
    /// Whether caching is enabled.
    enabled: bool,
    /// Whether entries changed since the last load or save.
    dirty: bool,
}

impl CacheStore {
    /// Creates an empty store that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
            enabled: true,
            dirty: false,
        }
    }

    /// Loads the store, falling back to an empty one on any failure.
    ///
    /// A missing document is the normal first-run case. An unreadable or
    /// corrupt document is logged as a warning and ignored, which only
    /// costs a redundant regeneration.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_load(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    "Ignoring unusable cache at {}: {}. All sources will be regenerated.",
                    path.display(),
                    e
                );
                Self::new(path)
            }
        }
    }

    /// Loads the store, reporting why a present document could not be used.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        let mut store = Self::new(path);

        if !path.exists() {
            debug!("No cache file found at {}", path.display());
            return Ok(store);
        }

        let content = fs::read(path)?;
        let document: CacheDocument =
            serde_json::from_slice(&content).map_err(|e| CacheError::corrupted(e.to_string()))?;

        if document.version != CACHE_FORMAT_VERSION {
            return Err(CacheError::UnsupportedVersion {
                found: document.version,
                expected: CACHE_FORMAT_VERSION,
            });
        }

        info!("Loaded {} cache entries", document.entries.len());
        store.entries = document.entries;
        Ok(store)
    }

    /// Disables caching. Every source then reports [`CacheStatus::Untracked`].
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Returns whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the document location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Gets the entry for a source.
    pub fn get(&self, source_name: &str) -> Option<&CacheEntry> {
        if !self.enabled {
            return None;
        }
        self.entries.get(source_name)
    }

    /// Iterates over all entries in source-name order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    /// Classifies a source against the store.
    ///
    /// Never mutates the store.
    pub fn status(
        &self,
        source_name: &str,
        fingerprint: &str,
        expected_output: &Path,
    ) -> CacheStatus {
        let Some(entry) = self.get(source_name) else {
            return CacheStatus::Untracked;
        };

        if !entry.matches(fingerprint) {
            CacheStatus::Stale
        } else if !expected_output.is_file() {
            CacheStatus::MissingOutput
        } else {
            CacheStatus::Fresh
        }
    }

    /// Returns whether the source must be regenerated.
    pub fn should_regenerate(
        &self,
        source_name: &str,
        fingerprint: &str,
        expected_output: &Path,
    ) -> bool {
        self.status(source_name, fingerprint, expected_output)
            .should_regenerate()
    }

    /// Upserts the entry for a source and marks the store dirty.
    pub fn record(
        &mut self,
        source_name: &str,
        fingerprint: &str,
        output_path: impl Into<PathBuf>,
    ) {
        if !self.enabled {
            return;
        }
        let entry = CacheEntry::new(source_name, fingerprint, output_path);
        self.entries.insert(source_name.to_string(), entry);
        self.dirty = true;
    }

    /// Removes the entry for a source.
    pub fn remove(&mut self, source_name: &str) -> Option<CacheEntry> {
        let removed = self.entries.remove(source_name);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.dirty = true;
        }
        self.entries.clear();
    }

    /// Saves the store to disk.
    ///
    /// The document is written to a temporary file in the same directory,
    /// flushed, and renamed over the previous document.
    pub fn save(&mut self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let document = CacheDocumentRef {
            version: CACHE_FORMAT_VERSION,
            entries: &self.entries,
        };
        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| CacheError::serialization(e.to_string()))?;

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(&bytes)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| CacheError::Io(e.error))?;

        self.dirty = false;
        info!(
            "Saved {} cache entries to {}",
            self.entries.len(),
            self.path.display()
        );

        Ok(())
    }

    /// Saves only when entries changed since the last load or save.
    pub fn save_if_dirty(&mut self) -> Result<(), CacheError> {
        if self.dirty {
            self.save()
        } else {
            Ok(())
        }
    }

    /// Deletes the cache document from disk and empties the store.
    ///
    /// Returns whether a document was present.
    pub fn delete(&mut self) -> Result<bool, CacheError> {
        self.entries.clear();
        self.dirty = false;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
