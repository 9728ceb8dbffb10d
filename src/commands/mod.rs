//! Command implementations

pub mod benchmark;
pub mod generate;
pub mod stats;

pub use benchmark::{BenchmarkResult, progress_bar, run_benchmark};
pub use generate::{GenerateConfig, GenerateError, GenerateResult, generate_crossword};
pub use stats::{DEFAULT_RANKING_LIMIT, run_stats};
