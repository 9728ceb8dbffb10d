//! Completion scoring
//!
//! Points for correct letters, a speed bonus and a clean-solve bonus for a
//! fully correct grid, minus a penalty per revealed hint.

use crate::core::Grid;
use serde::{Deserialize, Serialize};

/// Scoring constants
pub struct ScoringRules;

impl ScoringRules {
    pub const POINTS_PER_LETTER: u32 = 10;
    pub const SPEED_BONUS_MAX: f64 = 500.0;
    pub const SPEED_BONUS_DECAY_PER_MINUTE: f64 = 50.0;
    pub const COMPLETION_BONUS: u32 = 300;
    pub const HINT_PENALTY: u32 = 100;
}

/// Outcome of checking a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
    pub elapsed_seconds: u64,
    pub base: u32,
    pub speed_bonus: u32,
    pub completion_bonus: u32,
    pub hint_penalty: u32,
    pub final_score: u32,
}

impl ScoreResult {
    /// Score `correct` out of `total` letters
    ///
    /// # Examples
    /// ```
    /// use crossword_engine::session::ScoreResult;
    ///
    /// let score = ScoreResult::compute(10, 10, 30, 0);
    /// assert_eq!(score.percentage, 100);
    /// assert_eq!(score.speed_bonus, 475);
    /// assert_eq!(score.final_score, 875);
    /// ```
    #[must_use]
    pub fn compute(correct: u32, total: u32, elapsed_seconds: u64, hints_used: u32) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (f64::from(correct) / f64::from(total) * 100.0).round() as u32
        };
        let complete = percentage == 100;

        let base = correct * ScoringRules::POINTS_PER_LETTER;
        let speed_bonus = if complete {
            let minutes = elapsed_seconds as f64 / 60.0;
            (ScoringRules::SPEED_BONUS_MAX - minutes * ScoringRules::SPEED_BONUS_DECAY_PER_MINUTE)
                .round()
                .max(0.0) as u32
        } else {
            0
        };
        let completion_bonus = if complete && hints_used == 0 {
            ScoringRules::COMPLETION_BONUS
        } else {
            0
        };
        let hint_penalty = hints_used * ScoringRules::HINT_PENALTY;

        let final_score = (i64::from(base) + i64::from(speed_bonus) + i64::from(completion_bonus)
            - i64::from(hint_penalty))
        .max(0) as u32;

        Self {
            correct,
            total,
            percentage,
            elapsed_seconds,
            base,
            speed_bonus,
            completion_bonus,
            hint_penalty,
            final_score,
        }
    }

    /// Score the entered letters of `grid`
    #[must_use]
    pub fn from_grid(grid: &Grid, elapsed_seconds: u64, hints_used: u32) -> Self {
        let (correct, total) = grid
            .open_cells()
            .fold((0, 0), |(correct, total), (_, _, cell)| {
                (correct + u32::from(cell.is_correct()), total + 1)
            });
        Self::compute(correct, total, elapsed_seconds, hints_used)
    }
}
