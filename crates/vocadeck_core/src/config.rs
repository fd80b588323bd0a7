//! Deck generation configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::VocadeckError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Default text-to-speech endpoint.
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Default translation endpoint.
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Default spreadsheet export endpoint.
pub const DEFAULT_SHEETS_URL: &str = "https://docs.google.com/spreadsheets/d";

/// Configuration for deck generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Directory receiving generated audio clips.
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// Directory receiving deck packages.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to skip unchanged sources.
    #[serde(default = "default_true")]
    pub cache: bool,

    /// Location of the cache document.
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Whether to synthesize pronunciation audio.
    #[serde(default = "default_true")]
    pub audio: bool,

    /// Speech language code.
    #[serde(default = "default_target_lang")]
    pub language: String,

    /// Slower pronunciation.
    #[serde(default)]
    pub slow: bool,

    /// Translation source language.
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    /// Translation target language.
    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// Shuffle note order inside each deck.
    #[serde(default)]
    pub shuffle: bool,

    /// Timeout for remote requests, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Text-to-speech endpoint.
    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// Translation endpoint.
    #[serde(default = "default_translate_url")]
    pub translate_url: String,

    /// Spreadsheet export endpoint.
    #[serde(default = "default_sheets_url")]
    pub sheets_url: String,

    /// Online spreadsheet to read sheets from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet: Option<SpreadsheetConfig>,

    /// Base directory for resolving relative paths.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// An online spreadsheet and the sheets to turn into decks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpreadsheetConfig {
    /// Spreadsheet id (the long token in its URL).
    pub id: String,

    /// Sheet names built by `--all-sheets`.
    #[serde(default)]
    pub sheets: Vec<String>,
}

/// Settings that change the generated artifact.
///
/// Part of every source fingerprint, so changing one regenerates all decks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub audio: bool,
    pub language: String,
    pub slow: bool,
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            audio: true,
            language: default_target_lang(),
            slow: false,
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_audio_dir() -> String {
    "audio".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_cache_file() -> String {
    ".sheet_cache.json".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "fr".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_tts_url() -> String {
    DEFAULT_TTS_URL.to_string()
}

fn default_translate_url() -> String {
    DEFAULT_TRANSLATE_URL.to_string()
}

fn default_sheets_url() -> String {
    DEFAULT_SHEETS_URL.to_string()
}

impl DeckConfig {
    /// Config file names searched by [`DeckConfig::discover`].
    pub const CONFIG_FILES: &'static [&'static str] = &[".vocadeck.json"];

    /// Creates a configuration with every default.
    pub fn new() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            output_dir: default_output_dir(),
            cache: true,
            cache_file: default_cache_file(),
            audio: true,
            language: default_target_lang(),
            slow: false,
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            shuffle: false,
            timeout_secs: default_timeout_secs(),
            tts_url: default_tts_url(),
            translate_url: default_translate_url(),
            sheets_url: default_sheets_url(),
            spreadsheet: None,
            base_dir: None,
        }
    }

    /// Looks for a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VocadeckError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| VocadeckError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, VocadeckError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| VocadeckError::config(format!("Invalid JSON: {}", e)))?;

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(VocadeckError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| VocadeckError::config(format!("Invalid config: {}", e)))
    }

    /// Serializes the configuration for `vocadeck init`.
    pub fn to_json_pretty(&self) -> Result<String, VocadeckError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VocadeckError::config(format!("Failed to serialize config: {}", e)))
    }

    /// Resolves a configured path against the config file's directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Resolved audio directory.
    pub fn audio_dir(&self) -> PathBuf {
        self.resolve(&self.audio_dir)
    }

    /// Resolved output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    /// Resolved cache document path.
    pub fn cache_file(&self) -> PathBuf {
        self.resolve(&self.cache_file)
    }

    /// Timeout for remote requests.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the settings that affect generated artifacts.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            audio: self.audio,
            language: self.language.clone(),
            slow: self.slow,
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
        }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::new()
    }
}
