//! Vocabulary rows and their fingerprints.

use serde::{Deserialize, Serialize};

use crate::config::GenerationSettings;
use crate::identity::Fingerprint;

/// One vocabulary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Front text (English word or phrase).
    pub english: String,

    /// Back text (French). Empty means "look up a translation".
    #[serde(default)]
    pub french: String,

    /// Whether a French-to-English card is generated as well.
    #[serde(default)]
    pub reversed: bool,
}

impl VocabEntry {
    /// Creates an entry with a provided translation.
    pub fn new(english: impl Into<String>, french: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            french: french.into(),
            reversed: false,
        }
    }

    /// Marks the entry as reversed.
    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Returns whether a French translation was supplied by the source.
    pub fn has_translation(&self) -> bool {
        !self.french.trim().is_empty()
    }
}

/// A named, ordered set of vocabulary rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabSheet {
    /// Source name: file stem or spreadsheet sheet name.
    pub name: String,

    /// Rows in source order.
    pub entries: Vec<VocabEntry>,
}

#[derive(Serialize)]
struct FingerprintInput<'a> {
    settings: &'a GenerationSettings,
    entries: &'a [VocabEntry],
}

impl VocabSheet {
    /// Creates a sheet.
    pub fn new(name: impl Into<String>, entries: Vec<VocabEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many rows still need a translation.
    pub fn missing_translations(&self) -> usize {
        self.entries.iter().filter(|e| !e.has_translation()).count()
    }

    /// Computes the fingerprint of the rows under the given settings.
    ///
    /// Rows are serialized in source order. Study-order shuffling happens
    /// after this point and never affects the result.
    pub fn fingerprint(&self, settings: &GenerationSettings) -> Fingerprint {
        let input = FingerprintInput {
            settings,
            entries: &self.entries,
        };
        let bytes = serde_json::to_vec(&input).expect("row set serializes");
        Fingerprint::of_bytes(&bytes)
    }
}
