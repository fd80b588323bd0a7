//! # vocadeck_cache
//!
//! Change-aware cache for deck generation.
//!
//! This crate decides whether a vocabulary source has to be regenerated
//! by comparing a fresh content fingerprint against the one recorded the
//! last time the source was packaged.
//!
//! ## Cache Strategy
//!
//! 1. **Source-level cache**: Skip sources whose fingerprint hasn't changed
//! 2. **Output-aware**: Regenerate when the recorded artifact was deleted
//! 3. **Fail-soft**: A missing or corrupt document only forfeits caching
//!
//! ## Storage
//!
//! The store is a single human-readable JSON document. Saving writes a
//! temporary sibling file and renames it over the document, so an
//! interrupted write never leaves a truncated store behind.

mod entry;
mod error;
mod shared;
mod store;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use shared::SharedCacheStore;
pub use store::{CACHE_FORMAT_VERSION, CacheStatus, CacheStore};
