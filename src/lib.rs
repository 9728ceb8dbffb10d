//! Crossword Engine
//!
//! Builds themed crosswords from `(answer, clue)` lists with a parallel,
//! crossing-first layout search, and plays them through a solve session with
//! cursor navigation, hints and scoring.
//!
//! # Quick Start
//!
//! ```rust
//! use crossword_engine::core::WordClue;
//! use crossword_engine::layout::{LayoutConfig, build_layout};
//! use crossword_engine::session::SolveSession;
//!
//! let words: Vec<WordClue> = [("LUNA", "Satellite"), ("SOL", "Star"), ("SAL", "Seasoning"), ("ALA", "Wing")]
//!     .into_iter()
//!     .map(|(w, c)| WordClue::new(w, c).unwrap())
//!     .collect();
//!
//! let config = LayoutConfig::new().with_min_words(3).with_seed(7);
//! let crossword = build_layout(&words, &config).unwrap();
//!
//! let mut session = SolveSession::new(crossword);
//! session.reveal_answers();
//! let score = session.check_answers();
//! assert_eq!(score.percentage, 100);
//! ```

// Core domain types
pub mod core;

// Layout search
pub mod layout;

// Solve sessions and scoring
pub mod session;

// Analytics records
pub mod analytics;

// Word supply
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
