//! Solving a crossword: cursor movement, letter entry, hints and scoring

mod cursor;
mod scoring;
#[allow(clippy::module_inception)]
mod session;

pub use cursor::{Arrow, Direction};
pub use scoring::{ScoreResult, ScoringRules};
pub use session::{Phase, SolveSession};
