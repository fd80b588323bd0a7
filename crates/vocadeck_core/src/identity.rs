//! Stable identifiers and content fingerprints.
//!
//! Identifiers are pure functions of their input text. They name decks and
//! audio clips, so the same text must yield the same identifier on every
//! machine and every run.
//!
//! Two hash families are used:
//!
//! - [`derive`] uses MD5 (scheme [`IDENTITY_SCHEME`]). Deck ids and audio file
//!   names already imported into Anki were produced with it, so it is part of
//!   the public contract. Switching algorithms changes every deck id and
//!   fragments existing collections.
//! - [`Fingerprint`] uses BLAKE3 and only ever lives in the local cache
//!   document, so it can change with the cache format version.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name and version of the identifier derivation.
pub const IDENTITY_SCHEME: &str = "md5-v1";

/// Number of leading digest bits kept for deck ids.
pub const DECK_ID_BITS: u32 = 32;

/// File extension of generated audio clips.
pub const AUDIO_EXTENSION: &str = "mp3";

/// A 128-bit identifier derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StableId([u8; 16]);

impl StableId {
    /// Returns the raw digest.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the 32-character lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Returns the leading `bits` bits of the digest as an integer.
    ///
    /// Equivalent to reading the first `bits / 4` hex characters as a
    /// number. `None` unless `1 <= bits <= 64`.
    pub fn high_bits(&self, bits: u32) -> Option<u64> {
        if bits == 0 || bits > 64 {
            return None;
        }
        Some((u128::from_be_bytes(self.0) >> (128 - bits)) as u64)
    }

    /// Reduces the digest, read as a big-endian integer, modulo `range`.
    pub fn reduce(&self, range: u64) -> Option<u64> {
        if range == 0 {
            return None;
        }
        Some((u128::from_be_bytes(self.0) % u128::from(range)) as u64)
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Derives the stable identifier of `content`.
///
/// The input is hashed literally. Callers that want case or whitespace
/// insensitivity must normalize first.
pub fn derive(content: &str) -> StableId {
    StableId(md5::compute(content.as_bytes()).0)
}

/// Derives the Anki deck id for a deck display name.
pub fn deck_id(display_name: &str) -> i64 {
    let digest = derive(display_name);
    let bytes = digest.as_bytes();
    i64::from(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Derives the audio file name for a vocabulary entry's source text.
pub fn audio_filename(source_text: &str) -> String {
    format!("{}.{}", derive(source_text), AUDIO_EXTENSION)
}

/// Fixed-length digest of a byte-stable serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of `bytes`.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// Returns the hex rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
