//! Multi-trial layout search
//!
//! Runs many independent greedy trials in parallel and keeps the one with the
//! most crossings.

use super::LayoutConfig;
use super::trial::{TrialOutcome, run_trial};
use super::trim::trim;
use crate::core::{Crossword, WordClue};
use rayon::prelude::*;
use std::cmp::{Ordering, Reverse};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Why no crossword could be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The word list was empty
    #[error("No usable words were supplied")]
    InputRejected,
    /// No trial placed enough answers
    #[error("Cannot build a crossword from this word set: no layout out of {trials} trials placed {min_words} words")]
    Unachievable { trials: usize, min_words: usize },
}

/// Build a crossword from `words`
///
/// Every trial is a pure function of the word list, the base seed and its
/// index, so trials are evaluated in parallel and reduced by crossing count,
/// earliest trial winning ties. With a fixed `config.seed` the result is
/// deterministic, and raising `config.trials` never lowers the crossing count.
///
/// # Errors
///
/// Returns `LayoutError::InputRejected` for an empty list and
/// `LayoutError::Unachievable` when no trial reached `config.min_words`.
///
/// # Examples
/// ```
/// use crossword_engine::core::WordClue;
/// use crossword_engine::layout::{LayoutConfig, build_layout};
///
/// let words: Vec<WordClue> = [("SOL", "Star"), ("LUNA", "Satellite"), ("SAL", "Seasoning")]
///     .into_iter()
///     .map(|(w, c)| WordClue::new(w, c).unwrap())
///     .collect();
///
/// let config = LayoutConfig::new().with_min_words(2).with_seed(1);
/// let crossword = build_layout(&words, &config).unwrap();
/// assert!(crossword.placed_words().len() >= 2);
/// ```
#[instrument(skip(words), fields(words = words.len()))]
pub fn build_layout(words: &[WordClue], config: &LayoutConfig) -> Result<Crossword, LayoutError> {
    if words.is_empty() {
        return Err(LayoutError::InputRejected);
    }

    let base_seed = config.seed.unwrap_or_else(rand::random);
    debug!(base_seed, "starting layout search");

    let best = best_trial(words, config, base_seed).ok_or(LayoutError::Unachievable {
        trials: config.trials,
        min_words: config.min_words,
    })?;

    info!(
        trial = best.index,
        placed = best.placed.len(),
        crossings = best.crossings,
        "layout selected"
    );

    let (grid, placed) = trim(&best.grid, &best.placed);
    Ok(Crossword::new(grid, placed, best.crossings))
}

/// Best accepted trial out of `config.trials`, or `None` if none qualified
#[must_use]
pub fn best_trial(words: &[WordClue], config: &LayoutConfig, base_seed: u64) -> Option<TrialOutcome> {
    (0..config.trials)
        .into_par_iter()
        .filter_map(|index| run_trial(words, config, base_seed, index))
        .max_by(compare_trials)
}

/// Total order on trials: more crossings first, then the lower index
fn compare_trials(a: &TrialOutcome, b: &TrialOutcome) -> Ordering {
    (a.crossings, Reverse(a.index)).cmp(&(b.crossings, Reverse(b.index)))
}
