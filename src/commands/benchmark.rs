//! Benchmark command
//!
//! Builds many layouts from one word list with different seeds.

use crate::core::WordClue;
use crate::layout::{LayoutConfig, build_layout};
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
#[derive(Debug)]
pub struct BenchmarkResult {
    pub layouts: usize,
    pub successes: usize,
    pub mean_crossings: f64,
    pub min_crossings: usize,
    pub max_crossings: usize,
    pub mean_placed: f64,
    /// Placed answers per successful layout -> layouts
    pub placed_distribution: FxHashMap<usize, usize>,
    pub duration: Duration,
}

impl BenchmarkResult {
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.layouts == 0 {
            0.0
        } else {
            self.successes as f64 / self.layouts as f64 * 100.0
        }
    }

    #[must_use]
    pub fn time_per_layout(&self) -> Duration {
        u32::try_from(self.layouts)
            .ok()
            .filter(|&n| n > 0)
            .map_or(Duration::ZERO, |n| self.duration / n)
    }
}

/// Progress bar for `len` steps, hidden when `visible` is false
#[must_use]
pub fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}

/// Build `count` layouts from `words`, seeding layout `i` with `base_seed + i`
pub fn run_benchmark(
    words: &[WordClue],
    config: &LayoutConfig,
    count: usize,
    base_seed: u64,
    pb: &ProgressBar,
) -> BenchmarkResult {
    let start = Instant::now();
    let mut crossings = Vec::with_capacity(count);
    let mut placed = Vec::with_capacity(count);
    let mut placed_distribution: FxHashMap<usize, usize> = FxHashMap::default();

    for i in 0..count {
        let seeded = config.with_seed(base_seed.wrapping_add(i as u64));
        if let Ok(crossword) = build_layout(words, &seeded) {
            crossings.push(crossword.crossings());
            placed.push(crossword.placed_words().len());
            *placed_distribution
                .entry(crossword.placed_words().len())
                .or_insert(0) += 1;
        }
        pb.set_message(format!("{} built", crossings.len()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mean = |values: &[usize]| {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<usize>() as f64 / values.len() as f64
        }
    };

    BenchmarkResult {
        layouts: count,
        successes: crossings.len(),
        mean_crossings: mean(&crossings),
        min_crossings: crossings.iter().copied().min().unwrap_or(0),
        max_crossings: crossings.iter().copied().max().unwrap_or(0),
        mean_placed: mean(&placed),
        placed_distribution,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::{Difficulty, EmbeddedSupplier, WordSupplier};

    fn words(list: &[&str]) -> Vec<WordClue> {
        list.iter()
            .map(|w| WordClue::new(*w, "clue").unwrap())
            .collect()
    }

    #[test]
    fn benchmark_runs() {
        let list = EmbeddedSupplier.fetch("kitchen", Difficulty::Hard).unwrap();
        let config = LayoutConfig::new().with_trials(10);
        let result = run_benchmark(&list, &config, 4, 100, &ProgressBar::hidden());

        assert_eq!(result.layouts, 4);
        assert_eq!(result.successes, 4);
        assert!((result.success_rate() - 100.0).abs() < f64::EPSILON);
        assert!(result.min_crossings >= 11);
        assert!(result.mean_crossings >= result.min_crossings as f64);
        assert!(result.mean_crossings <= result.max_crossings as f64);
        assert!((result.mean_placed - result.mean_crossings - 1.0).abs() < 1e-9);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let list = words(&["LUNA", "SOL", "SAL", "ALA"]);
        let config = LayoutConfig::new().with_min_words(3).with_trials(10);
        let result = run_benchmark(&list, &config, 6, 0, &ProgressBar::hidden());

        let sum: usize = result.placed_distribution.values().sum();
        assert_eq!(sum, result.successes);
    }

    #[test]
    fn benchmark_counts_failures() {
        let list = words(&["LUNA", "SOL"]);
        let config = LayoutConfig::new().with_trials(5);
        let result = run_benchmark(&list, &config, 3, 0, &ProgressBar::hidden());

        assert_eq!(result.successes, 0);
        assert!(result.success_rate().abs() < f64::EPSILON);
        assert_eq!((result.min_crossings, result.max_crossings), (0, 0));
    }

    #[test]
    fn benchmark_empty_run() {
        let result = run_benchmark(&[], &LayoutConfig::new(), 0, 0, &ProgressBar::hidden());
        assert_eq!(result.layouts, 0);
        assert_eq!(result.time_per_layout(), Duration::ZERO);
    }
}
