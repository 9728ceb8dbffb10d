//! Aggregate statistics over a JSON-lines analytics file

use super::sink::AnalyticsEvent;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Aggregated view of recorded analytics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSummary {
    pub total_topics: usize,
    pub total_words: usize,
    pub total_matches: usize,
    /// Mean match time in seconds, rounded
    pub average_seconds: u64,
    /// Mean final score, rounded
    pub average_score: u64,
    /// `(topic, times used)`, most used first
    pub popular_topics: Vec<(String, usize)>,
    /// `(word, times generated)`, most generated first
    pub repeated_words: Vec<(String, usize)>,
}

/// Read every well-formed event in `path`
///
/// Lines that fail to parse are skipped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn load_events(path: impl AsRef<Path>) -> io::Result<Vec<AnalyticsEvent>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(err) => {
                debug!(error = %err, "skipping malformed analytics line");
                None
            }
        })
        .collect())
}

/// Summarize the events in `path`
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn summarize_file(path: impl AsRef<Path>, limit: usize) -> io::Result<AnalyticsSummary> {
    Ok(summarize(&load_events(path)?, limit))
}

/// Summarize `events`, keeping at most `limit` entries per ranking
#[must_use]
pub fn summarize(events: &[AnalyticsEvent], limit: usize) -> AnalyticsSummary {
    let mut topic_counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut match_seconds = Vec::new();
    let mut match_scores = Vec::new();

    for event in events {
        match event {
            AnalyticsEvent::TopicUsed { topic, .. } => {
                *topic_counts.entry(topic).or_insert(0) += 1;
            }
            AnalyticsEvent::WordsGenerated { .. } => {}
            AnalyticsEvent::MatchPlayed {
                elapsed_seconds,
                final_score,
                ..
            } => {
                match_seconds.push(*elapsed_seconds);
                match_scores.push(u64::from(*final_score));
            }
        }
    }

    let usage = word_usage(events);
    let word_counts: FxHashMap<&str, usize> = usage
        .iter()
        .map(|u| (u.word.as_str(), u.times_generated))
        .collect();

    AnalyticsSummary {
        total_topics: topic_counts.len(),
        total_words: usage.len(),
        total_matches: match_seconds.len(),
        average_seconds: rounded_mean(&match_seconds),
        average_score: rounded_mean(&match_scores),
        popular_topics: ranked(topic_counts, limit),
        repeated_words: ranked(word_counts, limit),
    }
}

/// Generation history of one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordUsage {
    pub word: String,
    /// Most recent clue recorded for the answer
    pub clue: String,
    /// Number of generations the answer appeared in
    pub times_generated: usize,
    /// Topics the answer was generated for, first use first
    pub topics: Vec<String>,
}

impl WordUsage {
    #[must_use]
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t.eq_ignore_ascii_case(topic))
    }
}

/// Per-answer usage across every `WordsGenerated` record, in first-seen order
///
/// An answer repeated inside one record counts once for that record.
#[must_use]
pub fn word_usage(events: &[AnalyticsEvent]) -> Vec<WordUsage> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut usage: Vec<WordUsage> = Vec::new();

    for event in events {
        let AnalyticsEvent::WordsGenerated { topic, words, .. } = event else {
            continue;
        };
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for recorded in words {
            if !seen.insert(recorded.word.as_str()) {
                continue;
            }
            let slot = *index.entry(recorded.word.as_str()).or_insert_with(|| {
                usage.push(WordUsage {
                    word: recorded.word.clone(),
                    clue: String::new(),
                    times_generated: 0,
                    topics: Vec::new(),
                });
                usage.len() - 1
            });
            let entry = &mut usage[slot];
            entry.times_generated += 1;
            if !recorded.clue.is_empty() {
                entry.clue.clone_from(&recorded.clue);
            }
            if !entry.has_topic(topic) {
                entry.topics.push(topic.clone());
            }
        }
    }
    usage
}

fn rounded_mean(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    (values.iter().sum::<u64>() as f64 / values.len() as f64).round() as u64
}

/// Sort by count descending, then name, and keep the first `limit`
fn ranked(counts: FxHashMap<&str, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}
