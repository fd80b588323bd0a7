//! Error types for deck generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building decks.
#[derive(Debug, Error)]
pub enum VocadeckError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A vocabulary source could not be read or is malformed.
    #[error("Source error in {path}: {message}")]
    Source { path: PathBuf, message: String },

    /// Translation lookup failed.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Speech synthesis failed.
    #[error("Speech error: {0}")]
    Speech(String),

    /// Deck packaging failed.
    #[error("Package error: {0}")]
    Package(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] vocadeck_cache::CacheError),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VocadeckError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a source error.
    pub fn invalid_source(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Source {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a translation error.
    pub fn translation(message: impl Into<String>) -> Self {
        Self::Translation(message.into())
    }

    /// Creates a speech error.
    pub fn speech(message: impl Into<String>) -> Self {
        Self::Speech(message.into())
    }

    /// Creates a package error.
    pub fn package(message: impl Into<String>) -> Self {
        Self::Package(message.into())
    }
}

impl From<genanki_rs::Error> for VocadeckError {
    fn from(e: genanki_rs::Error) -> Self {
        Self::Package(e.to_string())
    }
}
