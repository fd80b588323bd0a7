//! Text cleanup and name derivation.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

/// Extension of generated deck packages.
pub const DECK_EXTENSION: &str = "apkg";

static PARENTHESIZED: OnceLock<Regex> = OnceLock::new();

/// Removes parenthesized notes such as gender markers before speech.
///
/// `"le chat (m)"` becomes `"le chat"`.
pub fn clean_for_speech(text: &str) -> String {
    let re = PARENTHESIZED.get_or_init(|| Regex::new(r"\([^)]*\)").expect("valid regex"));
    let stripped = re.replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds a deck display name from a CSV path.
///
/// `data/example_words.csv` becomes `Example Words`.
pub fn deck_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = file_name.replace(".csv", "");
    title_case(&stem.replace('_', " "))
}

/// Upper-cases the first letter of every word and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Turns a source name into a safe file stem.
///
/// Whitespace runs become `_`; characters not allowed in file names are
/// dropped. Case is preserved.
pub fn normalize_source_name(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "deck".to_string()
    } else {
        cleaned
    }
}

/// Returns `<output_dir>/<normalized source name>.apkg`.
pub fn output_path(output_dir: &Path, source_name: &str) -> PathBuf {
    output_dir.join(format!(
        "{}.{}",
        normalize_source_name(source_name),
        DECK_EXTENSION
    ))
}
