//! Word list parsing and cleanup
//!
//! Turns raw supplier output into validated `WordClue` entries: answers are
//! normalized, out-of-contract entries dropped, and duplicates removed.

use super::supplier::SupplyError;
use crate::core::{WordClue, fold_letter};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Shortest answer a supplier may hand to the layout engine
pub const MIN_WORD_LEN: usize = 4;
/// Longest answer a supplier may hand to the layout engine
pub const MAX_WORD_LEN: usize = 12;

/// Normalize a raw answer
///
/// Trims, uppercases and folds accents. Answers with interior whitespace,
/// non-letters, or a length outside 4 to 12 are rejected.
///
/// # Examples
/// ```
/// use crossword_engine::wordlists::loader::sanitize_word;
///
/// assert_eq!(sanitize_word("  canción "), Some("CANCION".to_string()));
/// assert_eq!(sanitize_word("año"), None);
/// assert_eq!(sanitize_word("two words"), None);
/// ```
#[must_use]
pub fn sanitize_word(raw: &str) -> Option<String> {
    let letters: Option<Vec<u8>> = raw.trim().chars().map(fold_letter).collect();
    let letters = letters?;
    if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&letters.len()) {
        return None;
    }
    String::from_utf8(letters).ok()
}

/// Validate `(word, clue)` pairs in order
///
/// The first occurrence of an answer wins; entries with an empty clue or an
/// answer that fails `sanitize_word` are dropped.
pub fn collect_entries<I, W, C>(pairs: I) -> Vec<WordClue>
where
    I: IntoIterator<Item = (W, C)>,
    W: AsRef<str>,
    C: AsRef<str>,
{
    let mut seen = FxHashSet::default();
    pairs
        .into_iter()
        .filter_map(|(word, clue)| {
            let clue = clue.as_ref().trim();
            let Some(word) = sanitize_word(word.as_ref()) else {
                debug!(word = word.as_ref(), "dropping answer outside the word contract");
                return None;
            };
            if clue.is_empty() || !seen.insert(word.clone()) {
                return None;
            }
            WordClue::new(word, clue).ok()
        })
        .collect()
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default, alias = "palabra", alias = "palabr")]
    word: String,
    #[serde(default, alias = "pista", alias = "pist")]
    clue: String,
}

/// Parse a JSON supplier payload, repairing the usual damage
///
/// Markdown code fences and any chatter around the outermost JSON array are
/// discarded. Entries may use `word`/`palabra` and `clue`/`pista` field names,
/// including the truncated forms `palabr` and `pist`. Array elements that are
/// not entries are skipped.
///
/// # Errors
///
/// Returns `SupplyError::Malformed` if no JSON array can be recovered.
///
/// # Examples
/// ```
/// use crossword_engine::wordlists::loader::repair_payload;
///
/// let payload = "```json\n[{\"palabra\": \"Órbita\", \"pista\": \"Path\"}]\n```";
/// let words = repair_payload(payload).unwrap();
/// assert_eq!(words[0].text(), "ORBITA");
/// ```
pub fn repair_payload(text: &str) -> Result<Vec<WordClue>, SupplyError> {
    let unfenced = text.replace("```json", "").replace("```", "");
    let (Some(start), Some(end)) = (unfenced.find('['), unfenced.rfind(']')) else {
        return Err(SupplyError::Malformed("no JSON array found".to_string()));
    };
    if end < start {
        return Err(SupplyError::Malformed("no JSON array found".to_string()));
    }

    let values: Vec<serde_json::Value> = serde_json::from_str(&unfenced[start..=end])
        .map_err(|e| SupplyError::Malformed(e.to_string()))?;

    let entries = values.into_iter().filter_map(|value| {
        serde_json::from_value::<RawEntry>(value)
            .ok()
            .map(|entry| (entry.word, entry.clue))
    });
    Ok(collect_entries(entries))
}

/// Parse `WORD|clue` lines; blank lines and `#` comments are ignored
#[must_use]
pub fn parse_pairs(text: &str) -> Vec<WordClue> {
    let pairs = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('|'));
    collect_entries(pairs)
}

/// Load entries from a file
///
/// Files whose first non-blank character is `[` or a code fence are read as
/// JSON payloads, anything else as `WORD|clue` lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a JSON payload is beyond
/// repair.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<WordClue>, SupplyError> {
    let content = fs::read_to_string(path)?;
    let head = content.trim_start();
    if head.starts_with('[') || head.starts_with("```") {
        repair_payload(&content)
    } else {
        Ok(parse_pairs(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_accepts_contract_words() {
        assert_eq!(sanitize_word("luna"), Some("LUNA".into()));
        assert_eq!(sanitize_word("CONSTELACION"), Some("CONSTELACION".into()));
        assert_eq!(sanitize_word("Pingüino"), Some("PINGUINO".into()));
    }

    #[test]
    fn sanitize_rejects_out_of_contract() {
        assert_eq!(sanitize_word("SOL"), None);
        assert_eq!(sanitize_word("CONSTELACIONES"), None);
        assert_eq!(sanitize_word("AGUA VIVA"), None);
        assert_eq!(sanitize_word("R2D2"), None);
        assert_eq!(sanitize_word(""), None);
    }

    #[test]
    fn collect_dedupes_and_drops_empty_clues() {
        let words = collect_entries([
            ("tide", "Rise and fall"),
            ("TIDE", "Duplicate"),
            ("reef", "  "),
            ("coral", "Builder"),
        ]);
        let texts: Vec<_> = words.iter().map(WordClue::text).collect();
        assert_eq!(texts, ["TIDE", "CORAL"]);
        assert_eq!(words[0].clue(), "Rise and fall");
    }

    #[test]
    fn repair_handles_fences_and_chatter() {
        let payload = "Sure! Here you go:\n```json\n[\n  {\"word\": \"nebula\", \"clue\": \"Cloud\"},\n  {\"palabr\": \"cometa\", \"pist\": \"Tail\"}\n]\n```\nEnjoy";
        let words = repair_payload(payload).unwrap();
        let texts: Vec<_> = words.iter().map(WordClue::text).collect();
        assert_eq!(texts, ["NEBULA", "COMETA"]);
        assert_eq!(words[1].clue(), "Tail");
    }

    #[test]
    fn repair_skips_odd_elements() {
        let payload = r#"[{"palabra": "GALAXIA", "pista": "Andromeda"}, 7, "x", {"pista": "no word"}]"#;
        let words = repair_payload(payload).unwrap();
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn repair_rejects_garbage() {
        assert!(matches!(
            repair_payload("no array here"),
            Err(SupplyError::Malformed(_))
        ));
        assert!(matches!(
            repair_payload("] backwards ["),
            Err(SupplyError::Malformed(_))
        ));
        assert!(matches!(
            repair_payload("[{\"word\": }]"),
            Err(SupplyError::Malformed(_))
        ));
    }

    #[test]
    fn parse_pairs_skips_comments() {
        let words = parse_pairs("# ocean\nCORAL|Reef builder\n\nbad line\nWHALE|Big\n");
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn load_from_file_detects_format() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("words.json");
        let text = dir.path().join("words.txt");
        std::fs::write(&json, r#"[{"word": "ORBIT", "clue": "Path"}]"#).unwrap();
        std::fs::write(&text, "ORBIT|Path\nCOMET|Tail\n").unwrap();

        assert_eq!(load_from_file(&json).unwrap().len(), 1);
        assert_eq!(load_from_file(&text).unwrap().len(), 2);
        assert!(matches!(
            load_from_file(dir.path().join("missing.txt")),
            Err(SupplyError::Io(_))
        ));
    }
}
