//! The finished puzzle handed from the layout engine to a solve session

use super::grid::Grid;
use super::placement::{Orientation, PlacedWord};

/// One line of a clue list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueEntry {
    pub number: u32,
    pub clue: String,
    pub answer_length: usize,
}

/// A laid-out crossword
///
/// Only the entered letters of its cells change after construction, and only
/// through a solve session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    grid: Grid,
    placed_words: Vec<PlacedWord>,
    crossings: usize,
}

impl Crossword {
    #[must_use]
    pub const fn new(grid: Grid, placed_words: Vec<PlacedWord>, crossings: usize) -> Self {
        Self {
            grid,
            placed_words,
            crossings,
        }
    }

    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Placed answers in placement order
    #[inline]
    #[must_use]
    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed_words
    }

    /// Number of answers placed through a crossing
    #[inline]
    #[must_use]
    pub const fn crossings(&self) -> usize {
        self.crossings
    }

    /// Clue list for one orientation, in placement order
    #[must_use]
    pub fn clues(&self, orientation: Orientation) -> Vec<ClueEntry> {
        self.placed_words
            .iter()
            .filter(|w| w.orientation == orientation)
            .map(|w| ClueEntry {
                number: w.number,
                clue: w.clue.clone(),
                answer_length: w.len(),
            })
            .collect()
    }

    /// True when every cell of `word` holds its solution letter
    #[must_use]
    pub fn is_word_fully_correct(&self, word: &PlacedWord) -> bool {
        word.cells().all(|(row, col)| {
            self.grid
                .cell(row, col)
                .is_some_and(super::grid::Cell::is_correct)
        })
    }
}
