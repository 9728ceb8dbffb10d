//! Mixing fresh answers with previously generated ones
//!
//! A crossword takes at most `MAX_FRESH` answers from the supplier and fills
//! the rest of its `BLEND_TOTAL` slots from the generation history. Rarely
//! used answers of the topic come first, then rarely used answers of any
//! topic, then the topic's common answers.

use super::loader::sanitize_word;
use crate::analytics::{AnalyticsEvent, WordUsage, word_usage};
use crate::core::WordClue;
use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Answers handed to the layout engine after blending
pub const BLEND_TOTAL: usize = 20;
/// Most supplier answers kept in a blend
pub const MAX_FRESH: usize = 12;
/// An answer generated fewer times than this counts as rarely used
pub const RARE_THRESHOLD: usize = 3;

/// History answers of the topic considered per blend
const TOPIC_POOL: usize = 30;
/// Least used answers of any topic considered per blend
const GENERAL_POOL: usize = 20;

/// Mix `fresh` supplier answers with answers from `events`
///
/// Of the slots left after the fresh answers, 60% go to rarely used answers
/// of `topic`, 30% to the least used answers overall and the remainder to
/// the topic's common answers. History answers longer than `max_len`, or
/// already chosen, are skipped. Slots the history cannot fill go back to the
/// unused fresh answers. The result is shuffled and holds at most
/// `BLEND_TOTAL` answers.
pub fn blend_with_history<R: Rng + ?Sized>(
    fresh: Vec<WordClue>,
    events: &[AnalyticsEvent],
    topic: &str,
    max_len: usize,
    rng: &mut R,
) -> Vec<WordClue> {
    let usage = word_usage(events);
    let candidates: Vec<(&WordUsage, WordClue)> = usage
        .iter()
        .filter_map(|u| {
            let word = sanitize_word(&u.word).filter(|w| w.len() <= max_len)?;
            if u.clue.trim().is_empty() {
                return None;
            }
            WordClue::new(word, u.clue.trim()).ok().map(|w| (u, w))
        })
        .collect();

    let topic_pool: Vec<&(&WordUsage, WordClue)> = candidates
        .iter()
        .filter(|(u, _)| u.has_topic(topic))
        .take(TOPIC_POOL)
        .collect();
    let (rare_topic, common_topic): (Vec<_>, Vec<_>) = topic_pool
        .into_iter()
        .partition(|(u, _)| u.times_generated < RARE_THRESHOLD);

    let mut general: Vec<&(&WordUsage, WordClue)> = candidates.iter().collect();
    general.sort_by_key(|(u, _)| u.times_generated);
    general.truncate(GENERAL_POOL);

    let fresh_count = fresh.len().min(MAX_FRESH);
    let open = BLEND_TOTAL - fresh_count;
    let rare_count = (open * 6 / 10).min(rare_topic.len());
    let general_count = (open * 3 / 10).min(general.len());
    let common_count = open - rare_count - general_count;

    let mut fresh = fresh.into_iter();
    let mut chosen: Vec<WordClue> = fresh.by_ref().take(fresh_count).collect();
    let mut seen: FxHashSet<String> = chosen.iter().map(|w| w.text().to_string()).collect();

    let rare = take_unseen(&rare_topic, rare_count, &mut seen, &mut chosen);
    let overall = take_unseen(&general, general_count, &mut seen, &mut chosen);
    let common = take_unseen(&common_topic, common_count, &mut seen, &mut chosen);

    let refill = BLEND_TOTAL.saturating_sub(chosen.len());
    chosen.extend(fresh.take(refill));

    debug!(
        fresh = fresh_count,
        rare_topic = rare,
        rare_overall = overall,
        common_topic = common,
        total = chosen.len(),
        "blended answers with history"
    );

    chosen.shuffle(rng);
    chosen.truncate(BLEND_TOTAL);
    chosen
}

/// Move up to `count` answers not yet in `seen` from `pool` into `chosen`
fn take_unseen(
    pool: &[&(&WordUsage, WordClue)],
    count: usize,
    seen: &mut FxHashSet<String>,
    chosen: &mut Vec<WordClue>,
) -> usize {
    let mut taken = 0;
    for (_, word) in pool {
        if taken == count {
            break;
        }
        if seen.insert(word.text().to_string()) {
            chosen.push(word.clone());
            taken += 1;
        }
    }
    taken
}

/// Answers to use when the history cannot be read
#[must_use]
pub fn fresh_only(mut fresh: Vec<WordClue>) -> Vec<WordClue> {
    fresh.truncate(BLEND_TOTAL);
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn clues(words: &[&str]) -> Vec<WordClue> {
        words
            .iter()
            .map(|w| WordClue::new(*w, format!("clue for {w}")).unwrap())
            .collect()
    }

    /// `times` generation records for `topic`, each listing every answer in `words`
    fn history(topic: &str, words: &[&str], times: usize) -> Vec<AnalyticsEvent> {
        (0..times)
            .map(|_| AnalyticsEvent::words_generated(topic, &clues(words)))
            .collect()
    }

    fn texts(words: &[WordClue]) -> FxHashSet<String> {
        words.iter().map(|w| w.text().to_string()).collect()
    }

    fn fresh_twenty() -> Vec<WordClue> {
        clues(&[
            "ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT", "GOLF", "HOTEL", "INDIA",
            "JULIET", "KILO", "LIMA", "MIKE", "NOVEMBER", "OSCAR", "PAPA", "QUEBEC", "ROMEO",
            "SIERRA", "TANGO",
        ])
    }

    #[test]
    fn empty_history_keeps_fresh_answers() {
        let mut rng = StdRng::seed_from_u64(1);
        let blended = blend_with_history(fresh_twenty(), &[], "ocean", 12, &mut rng);
        assert_eq!(blended.len(), BLEND_TOTAL);
        assert_eq!(texts(&blended), texts(&fresh_twenty()));
    }

    #[test]
    fn selection_prefers_rare_topic_then_rare_overall_then_common() {
        let mut events = history("ocean", &["CORAL", "SHELL", "WAVES", "SQUID", "KELP"], 1);
        events.extend(history("ocean", &["TIDES", "BEACH", "SHORE"], 5));
        events.extend(history("music", &["OPERA", "CELLO", "FLUTE"], 1));

        let mut rng = StdRng::seed_from_u64(7);
        let blended = blend_with_history(fresh_twenty(), &events, "ocean", 12, &mut rng);
        let got = texts(&blended);

        assert_eq!(blended.len(), BLEND_TOTAL);
        // 12 fresh, then 8 open slots: 4 rare topic, 2 overall, 2 common
        let fresh_kept = texts(&fresh_twenty()[..MAX_FRESH]);
        assert!(fresh_kept.is_subset(&got));
        for rare in ["CORAL", "SHELL", "WAVES", "SQUID"] {
            assert!(got.contains(rare), "{rare} missing");
        }
        // Least used overall: KELP (ocean, once) and OPERA (music, once)
        assert!(got.contains("KELP"));
        assert!(got.contains("OPERA"));
        assert!(!got.contains("CELLO"));
        assert!(got.contains("TIDES"));
        assert!(got.contains("BEACH"));
        assert!(!got.contains("SHORE"));
    }

    #[test]
    fn short_history_refills_with_fresh_answers() {
        let events = history("ocean", &["CORAL"], 1);
        let mut rng = StdRng::seed_from_u64(3);
        let blended = blend_with_history(fresh_twenty(), &events, "ocean", 12, &mut rng);

        let got = texts(&blended);
        assert_eq!(blended.len(), BLEND_TOTAL);
        assert!(got.contains("CORAL"));
        // Only one fresh answer is left out
        assert_eq!(got.intersection(&texts(&fresh_twenty())).count(), BLEND_TOTAL - 1);
    }

    #[test]
    fn history_respects_length_cap_and_duplicates() {
        let events = history("ocean", &["ALPHA", "CONSTELLATION", "STARFISHES"], 1);
        let mut rng = StdRng::seed_from_u64(5);
        let fresh = clues(&["ALPHA", "BRAVO"]);
        let blended = blend_with_history(fresh, &events, "ocean", 8, &mut rng);

        let got = texts(&blended);
        assert_eq!(got.len(), blended.len());
        assert_eq!(got, texts(&clues(&["ALPHA", "BRAVO"])));
    }

    #[test]
    fn blend_is_reproducible_for_a_seed() {
        let events = history("ocean", &["CORAL", "SHELL"], 1);
        let a = blend_with_history(fresh_twenty(), &events, "ocean", 12, &mut StdRng::seed_from_u64(9));
        let b = blend_with_history(fresh_twenty(), &events, "ocean", 12, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn fresh_only_caps_the_list() {
        let mut many = fresh_twenty();
        many.extend(clues(&["UNIFORM", "VICTOR"]));
        assert_eq!(fresh_only(many).len(), BLEND_TOTAL);
        assert_eq!(fresh_only(clues(&["ALPHA"])).len(), 1);
    }
}
