//! Placed answers and their orientation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction an answer runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Unit step `(d_row, d_col)` along this axis
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "Across",
            Self::Vertical => "Down",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An answer fixed at a position in the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub clue: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub number: u32,
}

impl PlacedWord {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.word.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Coordinates of the `index`-th letter
    #[must_use]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        match self.orientation {
            Orientation::Horizontal => (self.row, self.col + index),
            Orientation::Vertical => (self.row + index, self.col),
        }
    }

    /// All cells covered by the answer, first letter first
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).map(|i| self.position(i))
    }

    /// Offset of `(row, col)` within the answer, if covered
    #[must_use]
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        let offset = match self.orientation {
            Orientation::Horizontal if row == self.row && col >= self.col => col - self.col,
            Orientation::Vertical if col == self.col && row >= self.row => row - self.row,
            _ => return None,
        };
        (offset < self.len()).then_some(offset)
    }

    /// Whether the answer's span covers `(row, col)`
    #[inline]
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.index_of(row, col).is_some()
    }
}
