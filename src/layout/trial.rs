//! A single greedy layout attempt
//!
//! Each trial owns its working grid and placed-word list. Answers are placed
//! longest first; every answer after the anchor must cross one already on the
//! grid or it is dropped.

use super::LayoutConfig;
use crate::core::{Cell, Grid, Orientation, PlacedWord, WordClue};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;

/// Result of a trial that met the placed-word minimum
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub index: usize,
    pub grid: Grid,
    pub placed: Vec<PlacedWord>,
    pub crossings: usize,
}

/// Working state of one trial
pub(crate) struct Trial<'w> {
    grid: Grid,
    placed: Vec<PlacedWord>,
    sources: Vec<&'w WordClue>,
    next_number: u32,
}

impl<'w> Trial<'w> {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            placed: Vec::new(),
            sources: Vec::new(),
            next_number: 1,
        }
    }

    /// Place the first answer horizontally in the middle of the grid
    pub(crate) fn place_anchor(&mut self, word: &'w WordClue) -> bool {
        let size = self.grid.rows() as isize;
        let row = size / 2;
        let col = (size - word.len() as isize).div_euclid(2);
        self.try_place(word, row, col, Orientation::Horizontal)
    }

    /// Place `word` across the first compatible letter of an existing answer
    ///
    /// Existing answers are scanned in placement order and, for each, shared
    /// letters in the order `WordClue::crossing_points` yields them. The first
    /// candidate that fits wins.
    pub(crate) fn place_crossing(&mut self, word: &'w WordClue) -> bool {
        for k in 0..self.placed.len() {
            let source = self.sources[k];
            let base = &self.placed[k];
            let (base_row, base_col) = (base.row as isize, base.col as isize);
            let orientation = base.orientation.perpendicular();

            for (i, j) in word.crossing_points(source) {
                let (row, col) = match orientation {
                    Orientation::Vertical => (base_row - i as isize, base_col + j as isize),
                    Orientation::Horizontal => (base_row + j as isize, base_col - i as isize),
                };
                if self.try_place(word, row, col, orientation) {
                    return true;
                }
            }
        }
        false
    }

    pub(crate) fn try_place(
        &mut self,
        word: &'w WordClue,
        row: isize,
        col: isize,
        orientation: Orientation,
    ) -> bool {
        if !self.fits(word, row, col, orientation) {
            return false;
        }

        let number = self.next_number;
        self.next_number += 1;

        let placed = PlacedWord {
            word: word.text().to_string(),
            clue: word.clue().to_string(),
            row: row as usize,
            col: col as usize,
            orientation,
            number,
        };

        for ((r, c), &letter) in placed.cells().zip(word.letters()) {
            if let Some(cell) = self.grid.cell_mut(r, c)
                && cell.is_blocked()
            {
                *cell = Cell::open(letter);
            }
        }
        // A start shared with a perpendicular answer shows the newest number
        if let Some(cell) = self.grid.cell_mut(placed.row, placed.col) {
            cell.set_number(number);
        }

        self.placed.push(placed);
        self.sources.push(word);
        true
    }

    fn fits(&self, word: &WordClue, row: isize, col: isize, orientation: Orientation) -> bool {
        let len = word.len() as isize;
        let (dr, dc) = orientation.delta();
        let (end_row, end_col) = (row + dr * (len - 1), col + dc * (len - 1));

        if len == 0 || !self.grid.in_bounds(row, col) || !self.grid.in_bounds(end_row, end_col) {
            return false;
        }

        for (i, &letter) in word.letters().iter().enumerate() {
            let (r, c) = (row + dr * i as isize, col + dc * i as isize);
            match self.grid.get(r, c) {
                Some(cell) if cell.is_blocked() => {}
                Some(cell) if cell.solution() == Some(letter) => {
                    if self.covered_along(r as usize, c as usize, orientation) {
                        return false;
                    }
                }
                _ => return false,
            }
        }

        // Nothing may touch either end along the answer's own axis
        if self.grid.is_open(row - dr, col - dc) || self.grid.is_open(end_row + dr, end_col + dc) {
            return false;
        }

        // New letters may not sit beside existing ones without crossing them
        let (pr, pc) = orientation.perpendicular().delta();
        (0..len).all(|i| {
            let (r, c) = (row + dr * i, col + dc * i);
            self.grid.is_open(r, c)
                || !(self.grid.is_open(r - pr, c - pc) || self.grid.is_open(r + pr, c + pc))
        })
    }

    fn covered_along(&self, row: usize, col: usize, orientation: Orientation) -> bool {
        self.placed
            .iter()
            .any(|p| p.orientation == orientation && p.contains(row, col))
    }

    pub(crate) fn placed(&self) -> &[PlacedWord] {
        &self.placed
    }

    pub(crate) fn into_parts(self) -> (Grid, Vec<PlacedWord>) {
        (self.grid, self.placed)
    }
}

/// Seed for trial `index`, derived from the search's base seed
#[must_use]
pub fn trial_seed(base_seed: u64, index: usize) -> u64 {
    base_seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run trial `index` over `words`
///
/// Answers of equal length are shuffled with the trial's own seed before the
/// stable longest-first sort, so different trials explore different layouts
/// while a given `(base_seed, index)` always reproduces the same one.
///
/// Returns `None` when the anchor does not fit or fewer than
/// `config.min_words` answers were placed.
#[must_use]
pub fn run_trial(
    words: &[WordClue],
    config: &LayoutConfig,
    base_seed: u64,
    index: usize,
) -> Option<TrialOutcome> {
    let mut rng = StdRng::seed_from_u64(trial_seed(base_seed, index));
    let mut order: Vec<&WordClue> = words.iter().collect();
    order.shuffle(&mut rng);
    order.sort_by_key(|w| Reverse(w.len()));

    let (&anchor, rest) = order.split_first()?;

    let mut trial = Trial::new(config.grid_size);
    if !trial.place_anchor(anchor) {
        return None;
    }

    let mut crossings = 0;
    for &word in rest {
        if trial.place_crossing(word) {
            crossings += 1;
        }
    }

    if trial.placed().len() < config.min_words {
        return None;
    }

    let (grid, placed) = trial.into_parts();
    Some(TrialOutcome {
        index,
        grid,
        placed,
        crossings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> WordClue {
        WordClue::new(text, format!("clue for {text}")).unwrap()
    }

    #[test]
    fn anchor_is_centered_horizontally() {
        let luna = word("LUNA");
        let mut trial = Trial::new(25);
        assert!(trial.place_anchor(&luna));

        let anchor = &trial.placed()[0];
        assert_eq!((anchor.row, anchor.col), (12, 10));
        assert_eq!(anchor.orientation, Orientation::Horizontal);
        assert_eq!(anchor.number, 1);
        assert_eq!(trial.grid.cell(12, 10).unwrap().number(), Some(1));
    }

    #[test]
    fn anchor_too_long_for_grid_fails() {
        let long = word("ABCDEFGH");
        let mut trial = Trial::new(5);
        assert!(!trial.place_anchor(&long));
        assert!(trial.placed().is_empty());
    }

    #[test]
    fn crossing_places_perpendicular_on_shared_letter() {
        let luna = word("LUNA");
        let sol = word("SOL");
        let mut trial = Trial::new(25);
        trial.place_anchor(&luna);

        assert!(trial.place_crossing(&sol));
        let placed = &trial.placed()[1];
        assert_eq!(placed.orientation, Orientation::Vertical);
        assert_eq!((placed.row, placed.col), (10, 10));
        assert_eq!(placed.number, 2);
        assert_eq!(trial.grid.cell(12, 10).unwrap().solution(), Some(b'L'));
    }

    #[test]
    fn shared_start_cell_shows_latest_number() {
        let luna = word("LUNA");
        let lobo = word("LOBO");
        let mut trial = Trial::new(25);
        trial.place_anchor(&luna);

        assert!(trial.place_crossing(&lobo));
        let (first, second) = (&trial.placed()[0], &trial.placed()[1]);
        assert_eq!((second.row, second.col), (first.row, first.col));
        assert_eq!(first.number, 1);
        assert_eq!(second.number, 2);
        assert_eq!(trial.grid.cell(12, 10).unwrap().number(), Some(2));
    }

    #[test]
    fn letter_conflict_rejected() {
        let luna = word("LUNA");
        let sol = word("SOL");
        let mut trial = Trial::new(25);
        trial.place_anchor(&luna);

        // O would land on the U of LUNA
        assert!(!trial.try_place(&sol, 11, 11, Orientation::Vertical));
    }

    #[test]
    fn end_to_end_fusion_rejected() {
        let luna = word("LUNA");
        let sol = word("SOL");
        let mut trial = Trial::new(25);
        trial.place_anchor(&luna);

        assert!(!trial.try_place(&sol, 12, 14, Orientation::Horizontal));
        assert!(!trial.try_place(&sol, 12, 7, Orientation::Horizontal));
        assert!(trial.try_place(&sol, 12, 15, Orientation::Horizontal));
    }

    #[test]
    fn side_adjacency_rejected() {
        let luna = word("LUNA");
        let sol = word("SOL");
        let mut trial = Trial::new(25);
        trial.place_anchor(&luna);

        assert!(!trial.try_place(&sol, 11, 10, Orientation::Horizontal));
        assert!(!trial.try_place(&sol, 13, 11, Orientation::Horizontal));
    }

    #[test]
    fn parallel_overlap_rejected() {
        let luna = word("LUNA");
        let lunar = word("LUNAR");
        let mut trial = Trial::new(25);
        trial.place_anchor(&luna);

        assert!(!trial.try_place(&lunar, 12, 10, Orientation::Horizontal));
    }

    #[test]
    fn out_of_bounds_rejected() {
        let sol = word("SOL");
        let mut trial = Trial::new(5);
        assert!(!trial.try_place(&sol, -1, 0, Orientation::Vertical));
        assert!(!trial.try_place(&sol, 0, 3, Orientation::Horizontal));
        assert!(trial.try_place(&sol, 0, 2, Orientation::Horizontal));
    }

    #[test]
    fn non_crossing_word_is_discarded() {
        let words = vec![word("LUNA"), word("SOL"), word("TIC")];
        let config = LayoutConfig::new().with_min_words(1);

        let outcome = run_trial(&words, &config, 42, 0).unwrap();
        let texts: Vec<&str> = outcome.placed.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(texts, vec!["LUNA", "SOL"]);
        assert_eq!(outcome.crossings, 1);
    }

    #[test]
    fn trial_below_minimum_yields_nothing() {
        let words = vec![word("LUNA"), word("SOL"), word("TIC")];
        let config = LayoutConfig::new().with_min_words(3);
        assert!(run_trial(&words, &config, 42, 0).is_none());
    }

    #[test]
    fn empty_word_list_yields_nothing() {
        let config = LayoutConfig::new().with_min_words(0);
        assert!(run_trial(&[], &config, 1, 0).is_none());
    }

    #[test]
    fn same_seed_reproduces_trial() {
        let words: Vec<WordClue> = ["LUNA", "SOL", "SAL", "ALA"].into_iter().map(word).collect();
        let config = LayoutConfig::new().with_min_words(1);

        let a = run_trial(&words, &config, 99, 5).unwrap();
        let b = run_trial(&words, &config, 99, 5).unwrap();
        assert_eq!(a.placed, b.placed);
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn longest_word_anchors() {
        let words: Vec<WordClue> = ["SOL", "SAL", "LUNA", "ALA"].into_iter().map(word).collect();
        let config = LayoutConfig::new().with_min_words(1);

        for index in 0..10 {
            let outcome = run_trial(&words, &config, 3, index).unwrap();
            assert_eq!(outcome.placed[0].word, "LUNA");
        }
    }
}
