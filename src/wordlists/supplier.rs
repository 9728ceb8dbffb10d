//! Word/clue suppliers
//!
//! A supplier turns a topic and difficulty into a list of answers. The layout
//! engine never sees anything a supplier has not sanitized.

use super::embedded::TOPIC_PACKS;
use super::loader::{self, MAX_WORD_LEN};
use crate::core::WordClue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument};

/// Supplier failure
#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("Failed to read word list: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed word payload: {0}")]
    Malformed(String),
    #[error("Unknown topic '{topic}' (available: {available})")]
    UnknownTopic { topic: String, available: String },
    #[error("No usable answers for '{0}'")]
    NoUsableEntries(String),
}

/// How demanding the answers are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Longest answer kept at this difficulty
    #[must_use]
    pub const fn max_word_len(self) -> usize {
        match self {
            Self::Easy => 8,
            Self::Medium => 10,
            Self::Hard => MAX_WORD_LEN,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "facil" | "fácil" => Ok(Self::Easy),
            "medium" | "medio" => Ok(Self::Medium),
            "hard" | "dificil" | "difícil" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty '{other}' (easy, medium, hard)")),
        }
    }
}

/// Source of answers for a topic
pub trait WordSupplier: Send + Sync {
    /// Fetch sanitized answers for `topic`
    ///
    /// # Errors
    ///
    /// Returns `SupplyError` when the source cannot be read or yields no
    /// usable answers.
    fn fetch(&self, topic: &str, difficulty: Difficulty) -> Result<Vec<WordClue>, SupplyError>;
}

fn cap_length(words: Vec<WordClue>, difficulty: Difficulty, label: &str) -> Result<Vec<WordClue>, SupplyError> {
    let kept: Vec<WordClue> = words
        .into_iter()
        .filter(|w| w.len() <= difficulty.max_word_len())
        .collect();
    if kept.is_empty() {
        return Err(SupplyError::NoUsableEntries(label.to_string()));
    }
    Ok(kept)
}

/// Topic packs compiled into the binary
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSupplier;

impl EmbeddedSupplier {
    /// Names of the built-in topics, sorted
    #[must_use]
    pub fn topics() -> Vec<&'static str> {
        TOPIC_PACKS.iter().map(|(topic, _)| *topic).collect()
    }
}

impl WordSupplier for EmbeddedSupplier {
    #[instrument(skip(self))]
    fn fetch(&self, topic: &str, difficulty: Difficulty) -> Result<Vec<WordClue>, SupplyError> {
        let wanted = topic.trim().to_lowercase();
        let (_, pack) = TOPIC_PACKS
            .iter()
            .find(|(name, _)| *name == wanted)
            .ok_or_else(|| SupplyError::UnknownTopic {
                topic: topic.to_string(),
                available: Self::topics().join(", "),
            })?;

        let words = cap_length(loader::collect_entries(pack.iter().copied()), difficulty, &wanted)?;
        debug!(count = words.len(), "embedded pack loaded");
        Ok(words)
    }
}

/// Answers read from a JSON payload or `WORD|clue` file
///
/// The topic is only a label; every fetch returns the file's contents.
#[derive(Debug, Clone)]
pub struct FileSupplier {
    path: PathBuf,
}

impl FileSupplier {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordSupplier for FileSupplier {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn fetch(&self, topic: &str, difficulty: Difficulty) -> Result<Vec<WordClue>, SupplyError> {
        let words = loader::load_from_file(&self.path)?;
        let words = cap_length(words, difficulty, &self.path.display().to_string())?;
        debug!(count = words.len(), "word file loaded");
        Ok(words)
    }
}
