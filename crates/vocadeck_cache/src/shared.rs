//! Thread-safe handle over a single [`CacheStore`].

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{CacheError, CacheStatus, CacheStore};

/// Clonable handle that serializes every read-modify-write of the store.
///
/// Entries for different sources are independent, but they share one
/// backing document, so recording and saving happen under one lock.
#[derive(Clone)]
pub struct SharedCacheStore {
    inner: Arc<Mutex<CacheStore>>,
}

impl SharedCacheStore {
    /// Wraps a store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Classifies a source. See [`CacheStore::status`].
    pub fn status(
        &self,
        source_name: &str,
        fingerprint: &str,
        expected_output: &Path,
    ) -> CacheStatus {
        self.inner
            .lock()
            .status(source_name, fingerprint, expected_output)
    }

    /// Records a source and persists the whole document under one lock.
    pub fn record_and_save(
        &self,
        source_name: &str,
        fingerprint: &str,
        output_path: &Path,
    ) -> Result<(), CacheError> {
        let mut store = self.inner.lock();
        store.record(source_name, fingerprint, output_path);
        store.save()
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut CacheStore) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Returns the store if this is the last handle.
    pub fn try_into_inner(self) -> Result<CacheStore, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}
