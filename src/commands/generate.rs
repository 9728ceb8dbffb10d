//! Generate command
//!
//! Fetches answers for a topic, mixes in previously generated ones when a
//! history file is configured, and lays them out as a crossword.

use crate::analytics::{AnalyticsEvent, AnalyticsSink, load_events, record_best_effort};
use crate::core::{Crossword, WordClue};
use crate::layout::{LayoutConfig, LayoutError, build_layout};
use crate::wordlists::{Difficulty, SupplyError, WordSupplier, blend_with_history, fresh_only};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

/// Why a crossword could not be produced
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Supply(#[from] SupplyError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Request for one crossword
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub topic: String,
    pub difficulty: Difficulty,
    pub layout: LayoutConfig,
    /// Analytics file whose generation history is blended into the answers
    pub history: Option<PathBuf>,
}

impl GenerateConfig {
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            difficulty: Difficulty::default(),
            layout: LayoutConfig::default(),
            history: None,
        }
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_history(mut self, path: impl Into<PathBuf>) -> Self {
        self.history = Some(path.into());
        self
    }
}

/// A generated crossword and how it came about
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub topic: String,
    pub crossword: Crossword,
    pub words_supplied: usize,
    pub attempts: usize,
    pub duration: Duration,
}

/// Fetch answers and build a crossword
///
/// With a history file configured, the supplier's answers are blended with
/// earlier generations; an unreadable history leaves the fresh answers. An
/// unseeded search that fails is retried once with a fresh seed; a seeded
/// one would only repeat itself. The topic and the answers used are recorded
/// to `sink` on a best-effort basis.
///
/// # Errors
///
/// Returns `GenerateError` when the supplier fails or no layout reaches the
/// minimum number of answers.
pub fn generate_crossword(
    supplier: &dyn WordSupplier,
    config: &GenerateConfig,
    sink: &dyn AnalyticsSink,
) -> Result<GenerateResult, GenerateError> {
    let start = Instant::now();
    record_best_effort(sink, AnalyticsEvent::topic_used(&config.topic));

    let fresh = supplier.fetch(&config.topic, config.difficulty)?;
    let words = match &config.history {
        Some(path) => mix_with_history(fresh, path, config),
        None => fresh,
    };
    record_best_effort(sink, AnalyticsEvent::words_generated(&config.topic, &words));

    let (crossword, attempts) = layout_with_retry(&words, &config.layout)?;
    info!(
        topic = %config.topic,
        placed = crossword.placed_words().len(),
        attempts,
        "crossword generated"
    );

    Ok(GenerateResult {
        topic: config.topic.clone(),
        crossword,
        words_supplied: words.len(),
        attempts,
        duration: start.elapsed(),
    })
}

fn mix_with_history(fresh: Vec<WordClue>, path: &Path, config: &GenerateConfig) -> Vec<WordClue> {
    let events = match load_events(path) {
        Ok(events) => events,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "history unavailable, using fresh answers");
            return fresh_only(fresh);
        }
    };
    let mut rng = StdRng::seed_from_u64(config.layout.seed.unwrap_or_else(rand::random));
    blend_with_history(
        fresh,
        &events,
        &config.topic,
        config.difficulty.max_word_len(),
        &mut rng,
    )
}

fn layout_with_retry(words: &[WordClue], config: &LayoutConfig) -> Result<(Crossword, usize), LayoutError> {
    match build_layout(words, config) {
        Ok(crossword) => Ok((crossword, 1)),
        Err(err @ LayoutError::Unachievable { .. }) if config.seed.is_none() => {
            warn!(error = %err, "layout failed, retrying with a new seed");
            build_layout(words, config).map(|crossword| (crossword, 2))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{JsonlSink, MemorySink, NullSink};
    use crate::wordlists::EmbeddedSupplier;

    fn recorded_words(sink: &MemorySink) -> Vec<String> {
        let events = sink.events.lock().unwrap();
        let words = events
            .iter()
            .find_map(|event| match event {
                AnalyticsEvent::WordsGenerated { words, .. } => {
                    Some(words.iter().map(|w| w.word.clone()).collect())
                }
                _ => None,
            })
            .unwrap();
        words
    }

    #[test]
    fn generates_from_embedded_pack() {
        let config = GenerateConfig::new("music")
            .with_difficulty(Difficulty::Hard)
            .with_layout(LayoutConfig::new().with_trials(20).with_seed(4));

        let result = generate_crossword(&EmbeddedSupplier, &config, &NullSink).unwrap();
        assert_eq!(result.topic, "music");
        assert_eq!(result.words_supplied, 20);
        assert_eq!(result.attempts, 1);
        assert!(result.crossword.placed_words().len() >= 12);
    }

    #[test]
    fn records_topic_and_words() {
        let sink = MemorySink::default();
        let config = GenerateConfig::new("Ocean")
            .with_layout(LayoutConfig::new().with_trials(10).with_seed(1));

        generate_crossword(&EmbeddedSupplier, &config, &sink).unwrap();

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AnalyticsEvent::TopicUsed { topic, .. } if topic == "ocean"));
        assert!(matches!(&events[1], AnalyticsEvent::WordsGenerated { words, .. } if words.len() == 20));
    }

    #[test]
    fn history_answers_are_blended_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let earlier: Vec<WordClue> = [
            "GUITAR", "DRUMS", "CELLO", "FLUTE", "TENOR", "CHOIR", "REQUIEM", "MARCH",
        ]
        .iter()
        .map(|w| WordClue::new(*w, format!("clue for {w}")).unwrap())
        .collect();
        JsonlSink::open(&path)
            .unwrap()
            .record(AnalyticsEvent::words_generated("music", &earlier))
            .unwrap();

        let sink = MemorySink::default();
        let config = GenerateConfig::new("music")
            .with_layout(LayoutConfig::new().with_trials(40).with_min_words(6).with_seed(3))
            .with_history(&path);
        let result = generate_crossword(&EmbeddedSupplier, &config, &sink).unwrap();
        assert_eq!(result.words_supplied, 20);

        // 12 fresh, 4 rare answers of the topic, 2 least used overall, 2 refilled
        let words = recorded_words(&sink);
        for kept in ["GUITAR", "DRUMS", "CELLO", "FLUTE", "TENOR", "CHOIR"] {
            assert!(words.iter().any(|w| w == kept), "{kept} missing");
        }
        assert!(!words.iter().any(|w| w == "REQUIEM" || w == "MARCH"));
        assert!(words.iter().any(|w| w == "MELODY"));
    }

    #[test]
    fn unreadable_history_falls_back_to_fresh_answers() {
        let dir = tempfile::tempdir().unwrap();
        let sink = MemorySink::default();
        // A directory cannot be read as a history file
        let config = GenerateConfig::new("music")
            .with_layout(LayoutConfig::new().with_trials(20).with_seed(4))
            .with_history(dir.path());

        let result = generate_crossword(&EmbeddedSupplier, &config, &sink).unwrap();
        assert_eq!(result.words_supplied, 20);
        let mut words = recorded_words(&sink);
        words.sort();
        let mut pack: Vec<String> = EmbeddedSupplier
            .fetch("music", Difficulty::Medium)
            .unwrap()
            .iter()
            .map(|w| w.text().to_string())
            .collect();
        pack.sort();
        assert_eq!(words, pack);
    }

    #[test]
    fn missing_history_file_means_no_history() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerateConfig::new("music")
            .with_layout(LayoutConfig::new().with_trials(20).with_seed(4))
            .with_history(dir.path().join("not-yet.jsonl"));
        let result = generate_crossword(&EmbeddedSupplier, &config, &NullSink).unwrap();
        assert_eq!(result.words_supplied, 20);
    }

    #[test]
    fn unknown_topic_is_a_supply_error() {
        let config = GenerateConfig::new("geology");
        let err = generate_crossword(&EmbeddedSupplier, &config, &NullSink).unwrap_err();
        assert!(matches!(err, GenerateError::Supply(SupplyError::UnknownTopic { .. })));
    }

    #[test]
    fn seeded_failure_is_not_retried() {
        let words: Vec<WordClue> = ["LUNA", "SOL"]
            .iter()
            .map(|w| WordClue::new(*w, "clue").unwrap())
            .collect();
        let config = LayoutConfig::new().with_trials(5).with_seed(2);
        assert!(matches!(
            layout_with_retry(&words, &config),
            Err(LayoutError::Unachievable { .. })
        ));
    }
}
