//! Change-aware build loop over many sources.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};
use vocadeck_cache::{CacheStatus, CacheStore};

use crate::VocadeckError;
use crate::config::GenerationSettings;
use crate::generator::{DeckGenerator, GenerationReport};
use crate::speech::{SpeechSynthesizer, Translator};
use crate::text::output_path;
use crate::vocab::VocabSheet;

/// What happened to one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Rows and settings unchanged and the package is present.
    Skipped {
        source_name: String,
        output_path: PathBuf,
    },
    /// A package was written.
    Generated {
        source_name: String,
        status: String,
        report: GenerationReport,
        /// Set when the cache document could not be saved.
        #[serde(skip_serializing_if = "Option::is_none")]
        cache_warning: Option<String>,
    },
    /// The source could not be read or packaged.
    Failed { source_name: String, error: String },
}

impl SourceOutcome {
    /// Cache key of the source this outcome belongs to.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Skipped { source_name, .. }
            | Self::Generated { source_name, .. }
            | Self::Failed { source_name, .. } => source_name,
        }
    }

    /// True for sources that could not be read or packaged.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Drives generation for a sequence of sources.
///
/// Each source is fingerprinted, classified against the cache, and either
/// skipped or regenerated. The cache document is saved after every
/// recorded update.
pub struct BuildRunner<T, S> {
    generator: DeckGenerator<T, S>,
    cache: CacheStore,
    settings: GenerationSettings,
    output_dir: PathBuf,
    force: bool,
}

impl<T: Translator, S: SpeechSynthesizer> BuildRunner<T, S> {
    /// Creates a runner writing packages to `<output_dir>/<source>.apkg`.
    pub fn new(
        generator: DeckGenerator<T, S>,
        cache: CacheStore,
        settings: GenerationSettings,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            generator,
            cache,
            settings,
            output_dir: output_dir.into(),
            force: false,
        }
    }

    /// Regenerate every source regardless of the cache.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// The cache store as updated by the builds so far.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Consumes the runner, returning its cache store.
    pub fn into_cache(self) -> CacheStore {
        self.cache
    }

    /// Where the package for `source_name` is written.
    pub fn output_path_for(&self, source_name: &str) -> PathBuf {
        output_path(&self.output_dir, source_name)
    }

    /// Builds one source whose rows may have failed to load.
    pub fn build_loaded(
        &mut self,
        source_name: &str,
        deck_name: &str,
        loaded: Result<VocabSheet, VocadeckError>,
    ) -> SourceOutcome {
        match loaded {
            Ok(sheet) => self.build(&sheet, deck_name),
            Err(e) => {
                warn!("Failed to read {}: {}", source_name, e);
                SourceOutcome::Failed {
                    source_name: source_name.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Builds one source. The sheet name is the cache key.
    pub fn build(&mut self, sheet: &VocabSheet, deck_name: &str) -> SourceOutcome {
        let source_name = sheet.name.clone();
        let output = self.output_path_for(&source_name);
        let fingerprint = sheet.fingerprint(&self.settings);
        let status = self
            .cache
            .status(&source_name, fingerprint.as_str(), &output);

        if !self.force && !status.should_regenerate() {
            info!("{} is up to date, skipping", source_name);
            return SourceOutcome::Skipped {
                source_name,
                output_path: output,
            };
        }

        info!("Building {} ({})", source_name, status.as_str());
        match self.generator.generate(sheet, deck_name, &output) {
            Ok(report) => {
                let cache_warning = self.remember(&source_name, fingerprint.as_str(), &output, &report);
                SourceOutcome::Generated {
                    source_name,
                    status: status.as_str().to_string(),
                    report,
                    cache_warning,
                }
            }
            Err(e) => {
                warn!("Failed to build {}: {}", source_name, e);
                SourceOutcome::Failed {
                    source_name,
                    error: e.to_string(),
                }
            }
        }
    }

    fn remember(
        &mut self,
        source_name: &str,
        fingerprint: &str,
        output: &Path,
        report: &GenerationReport,
    ) -> Option<String> {
        if !report.is_complete() {
            warn!(
                "{} translations and {} audio clips failed for {}; it will be rebuilt next run",
                report.translation_failed, report.audio_failed, source_name
            );
            return None;
        }

        self.cache.record(source_name, fingerprint, output);
        match self.cache.save() {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to save cache: {}", e);
                Some(e.to_string())
            }
        }
    }

    /// Reports whether a source would be rebuilt, without building it.
    pub fn status(&self, sheet: &VocabSheet) -> CacheStatus {
        let output = self.output_path_for(&sheet.name);
        self.cache
            .status(&sheet.name, sheet.fingerprint(&self.settings).as_str(), &output)
    }
}
