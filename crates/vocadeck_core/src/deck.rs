//! Anki package writing.

use std::fs;
use std::path::{Path, PathBuf};

use genanki_rs::{Deck, Field, Model, Note, Package, Template};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::VocadeckError;

/// Note type id for English-to-French cards.
pub const BASIC_MODEL_ID: i64 = 1607392319;

/// Note type id for cards studied in both directions.
pub const REVERSED_MODEL_ID: i64 = 1607392320;

const ANSWER_SEPARATOR: &str = r#"{{FrontSide}}<hr id="answer">"#;

fn fields() -> Vec<Field> {
    vec![
        Field::new("English"),
        Field::new("French"),
        Field::new("Audio"),
    ]
}

fn forward_template() -> Template {
    Template::new("Card 1")
        .qfmt("{{English}}")
        .afmt(&format!("{}{{{{French}}}}<br>{{{{Audio}}}}", ANSWER_SEPARATOR))
}

/// Note type with one English-to-French card.
pub fn basic_model() -> Model {
    Model::new(
        BASIC_MODEL_ID,
        "French Vocabulary Model",
        fields(),
        vec![forward_template()],
    )
}

/// Note type with an extra French-to-English card.
pub fn reversed_model() -> Model {
    let backward = Template::new("Card 2")
        .qfmt("{{French}}<br>{{Audio}}")
        .afmt(&format!("{}{{{{English}}}}", ANSWER_SEPARATOR));
    Model::new(
        REVERSED_MODEL_ID,
        "French Vocabulary Model (and reversed)",
        fields(),
        vec![forward_template(), backward],
    )
}

/// Formats the Audio field for a clip file name.
pub fn sound_tag(file_name: &str) -> String {
    format!("[sound:{}]", file_name)
}

/// Field values of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub english: String,
    pub french: String,
    /// Clip file name, without directory.
    pub audio: Option<String>,
    pub reversed: bool,
}

impl NoteFields {
    fn audio_field(&self) -> String {
        self.audio.as_deref().map(sound_tag).unwrap_or_default()
    }
}

/// Writes a deck package to `output_path`.
///
/// `media` lists the clip files to embed. The package is written next to
/// its destination first and renamed into place.
pub fn write_package(
    deck_id: i64,
    deck_name: &str,
    notes: &[NoteFields],
    media: &[PathBuf],
    output_path: &Path,
) -> Result<(), VocadeckError> {
    let basic = basic_model();
    let reversed = reversed_model();

    let mut deck = Deck::new(deck_id, deck_name, "");
    for fields in notes {
        let model = if fields.reversed {
            reversed.clone()
        } else {
            basic.clone()
        };
        let audio = fields.audio_field();
        let note = Note::new(
            model,
            vec![fields.english.as_str(), fields.french.as_str(), audio.as_str()],
        )?;
        deck.add_note(note);
    }

    let media: Vec<&str> = media
        .iter()
        .map(|p| {
            p.to_str().ok_or_else(|| {
                VocadeckError::package(format!("non UTF-8 media path: {}", p.display()))
            })
        })
        .collect::<Result<_, _>>()?;
    let mut package = Package::new(vec![deck], media)?;

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let tmp = NamedTempFile::new_in(&dir)?;
    let tmp_path = tmp.path().to_str().ok_or_else(|| {
        VocadeckError::package(format!("non UTF-8 output path: {}", dir.display()))
    })?;
    package.write_to_file(tmp_path)?;
    tmp.persist(output_path)
        .map_err(|e| VocadeckError::Io(e.error))?;

    debug!(
        "Packaged {} notes into {}",
        notes.len(),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn note(english: &str, french: &str) -> NoteFields {
        NoteFields {
            english: english.to_string(),
            french: french.to_string(),
            audio: None,
            reversed: false,
        }
    }

    #[test]
    fn test_sound_tag() {
        assert_eq!(sound_tag("abc.mp3"), "[sound:abc.mp3]");
    }

    #[test]
    fn test_audio_field_empty_without_clip() {
        assert_eq!(note("run", "courir").audio_field(), "");
        let mut with_clip = note("run", "courir");
        with_clip.audio = Some("a.mp3".to_string());
        assert_eq!(with_clip.audio_field(), "[sound:a.mp3]");
    }

    #[test]
    fn test_write_package_creates_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out").join("Verbs.apkg");
        let mut reversed = note("eat", "manger");
        reversed.reversed = true;

        write_package(42, "Verbs", &[note("run", "courir"), reversed], &[], &output).unwrap();

        assert!(output.is_file());
        assert!(fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn test_write_package_embeds_media() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("a.mp3");
        fs::write(&clip, b"ID3").unwrap();
        let output = dir.path().join("Verbs.apkg");
        let mut fields = note("run", "courir");
        fields.audio = Some("a.mp3".to_string());

        write_package(42, "Verbs", &[fields], &[clip], &output).unwrap();
        assert!(output.is_file());
    }

    #[test]
    fn test_write_package_overwrites() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("Verbs.apkg");
        fs::write(&output, b"old").unwrap();

        write_package(42, "Verbs", &[note("run", "courir")], &[], &output).unwrap();
        assert_ne!(fs::read(&output).unwrap(), b"old");
    }
}
