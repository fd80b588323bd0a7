//! CSV vocabulary sources.
//!
//! A source is a CSV document with a header row. `English` is required;
//! `French` and `Reversed` are optional. Header names are matched without
//! regard to case or surrounding whitespace.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::VocadeckError;
use crate::vocab::{VocabEntry, VocabSheet};

const ENGLISH_COLUMN: &str = "English";
const FRENCH_COLUMN: &str = "French";
const REVERSED_COLUMN: &str = "Reversed";

struct Columns {
    english: usize,
    french: Option<usize>,
    reversed: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Option<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Some(Self {
            english: find(ENGLISH_COLUMN)?,
            french: find(FRENCH_COLUMN),
            reversed: find(REVERSED_COLUMN),
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "x"
    )
}

impl VocabSheet {
    /// Parses CSV text into a sheet named `name`.
    ///
    /// `origin` only appears in error messages.
    pub fn from_csv_str(
        name: impl Into<String>,
        text: &str,
        origin: impl Into<PathBuf>,
    ) -> Result<Self, VocadeckError> {
        let origin = origin.into();
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = Columns::from_headers(&headers).ok_or_else(|| {
            VocadeckError::invalid_source(&origin, "missing required column 'English'")
        })?;

        let mut entries = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // Header is line 1.
            let line = index + 2;
            let english = record.get(columns.english).unwrap_or("").to_string();
            if english.is_empty() {
                warn!("Skipping row {} of {}: empty English cell", line, origin.display());
                continue;
            }
            let french = columns
                .french
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string();
            let reversed = columns
                .reversed
                .and_then(|i| record.get(i))
                .is_some_and(is_truthy);

            entries.push(VocabEntry {
                english,
                french,
                reversed,
            });
        }

        let sheet = Self::new(name, entries);
        debug!("Read {} rows from {}", sheet.len(), origin.display());
        Ok(sheet)
    }

    /// Serializes the sheet back to CSV text.
    ///
    /// The `Reversed` column is only written when some entry uses it.
    pub fn to_csv_string(&self) -> Result<String, VocadeckError> {
        let with_reversed = self.entries.iter().any(|e| e.reversed);
        let mut writer = csv::Writer::from_writer(Vec::new());

        if with_reversed {
            writer.write_record([ENGLISH_COLUMN, FRENCH_COLUMN, REVERSED_COLUMN])?;
        } else {
            writer.write_record([ENGLISH_COLUMN, FRENCH_COLUMN])?;
        }

        for entry in &self.entries {
            if with_reversed {
                let flag = if entry.reversed { "1" } else { "" };
                writer.write_record([entry.english.as_str(), entry.french.as_str(), flag])?;
            } else {
                writer.write_record([entry.english.as_str(), entry.french.as_str()])?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| VocadeckError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| VocadeckError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

/// Loads a CSV file. The sheet is named after the file stem.
pub fn load_csv(path: impl AsRef<Path>) -> Result<VocabSheet, VocadeckError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| VocadeckError::invalid_source(path, format!("failed to read: {}", e)))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    VocabSheet::from_csv_str(name, &text, path)
}

/// Writes a sheet to `path`, replacing the file atomically.
pub fn write_csv(path: impl AsRef<Path>, sheet: &VocabSheet) -> Result<(), VocadeckError> {
    let path = path.as_ref();
    let text = sheet.to_csv_string()?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = NamedTempFile::new_in(&dir)?;
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| VocadeckError::Io(e.error))?;

    debug!("Wrote {} rows to {}", sheet.len(), path.display());
    Ok(())
}
