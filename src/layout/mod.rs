//! Crossword layout construction
//!
//! Greedy crossing-first trials, a parallel best-of search over them, and the
//! trimmer that crops the winning grid.

mod config;
mod search;
pub mod trial;
mod trim;

pub use config::LayoutConfig;
pub use search::{LayoutError, best_trial, build_layout};
pub use trial::{TrialOutcome, run_trial};
pub use trim::trim;
