//! Core domain types for crosswords
//!
//! Answers, the cell grid and the finished puzzle. Everything here is plain
//! data with no knowledge of how layouts are searched or how a puzzle is played.

mod crossword;
mod grid;
mod placement;
mod word;

pub use crossword::{ClueEntry, Crossword};
pub use grid::{Cell, Grid};
pub use placement::{Orientation, PlacedWord};
pub use word::{WordClue, WordError, fold_letter};
