//! Interactive solving of one crossword
//!
//! A `SolveSession` owns the puzzle while it is being played and is the only
//! thing that writes entered letters. Every operation is a no-op for blocked
//! or out-of-bounds coordinates.

use super::cursor::{Arrow, Direction, StepMode, step};
use super::scoring::ScoreResult;
use crate::analytics::{AnalyticsEvent, AnalyticsSink, NullSink, record_best_effort};
use chrono::Utc;
use crate::core::{Crossword, Orientation, PlacedWord, fold_letter};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Coarse state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No cell selected yet
    Idle,
    Editing,
    /// A score is on display
    Reviewed,
}

pub struct SolveSession {
    crossword: Crossword,
    topic: String,
    active_cell: Option<(usize, usize)>,
    orientation: Orientation,
    elapsed_seconds: u64,
    timer_running: bool,
    hints_used: u32,
    last_score: Option<ScoreResult>,
    sink: Arc<dyn AnalyticsSink>,
}

impl fmt::Debug for SolveSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveSession")
            .field("topic", &self.topic)
            .field("active_cell", &self.active_cell)
            .field("orientation", &self.orientation)
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("timer_running", &self.timer_running)
            .field("hints_used", &self.hints_used)
            .field("last_score", &self.last_score)
            .finish_non_exhaustive()
    }
}

impl SolveSession {
    /// Start solving `crossword` with analytics disabled
    #[must_use]
    pub fn new(crossword: Crossword) -> Self {
        Self {
            crossword,
            topic: String::new(),
            active_cell: None,
            orientation: Orientation::Horizontal,
            elapsed_seconds: 0,
            timer_running: false,
            hints_used: 0,
            last_score: None,
            sink: Arc::new(NullSink),
        }
    }

    /// Report match results for `topic` to `sink`
    #[must_use]
    pub fn with_analytics(mut self, topic: impl Into<String>, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.topic = topic.into();
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.last_score.is_some() {
            Phase::Reviewed
        } else if self.active_cell.is_some() {
            Phase::Editing
        } else {
            Phase::Idle
        }
    }

    #[must_use]
    pub const fn active_cell(&self) -> Option<(usize, usize)> {
        self.active_cell
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub const fn timer_running(&self) -> bool {
        self.timer_running
    }

    #[must_use]
    pub const fn hints_used(&self) -> u32 {
        self.hints_used
    }

    #[must_use]
    pub const fn last_score(&self) -> Option<&ScoreResult> {
        self.last_score.as_ref()
    }

    fn is_open(&self, row: usize, col: usize) -> bool {
        self.crossword
            .grid()
            .cell(row, col)
            .is_some_and(|cell| !cell.is_blocked())
    }

    /// Select a cell; selecting the active cell again flips the orientation
    pub fn select_cell(&mut self, row: usize, col: usize) {
        if !self.is_open(row, col) {
            return;
        }
        if self.active_cell == Some((row, col)) {
            self.orientation = self.orientation.perpendicular();
        } else {
            self.active_cell = Some((row, col));
        }
    }

    /// Flip the orientation without moving the cursor
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.perpendicular();
    }

    /// The first placed answer in the active orientation covering the cursor
    #[must_use]
    pub fn active_word(&self) -> Option<&PlacedWord> {
        let (row, col) = self.active_cell?;
        self.crossword
            .placed_words()
            .iter()
            .find(|w| w.orientation == self.orientation && w.contains(row, col))
    }

    /// Step from `from` and move the cursor there; an aborted step leaves it
    fn step_from(&mut self, from: (usize, usize), direction: Direction, mode: StepMode) -> Option<(usize, usize)> {
        let next = step(
            self.crossword.grid(),
            self.active_word(),
            from,
            self.orientation,
            direction,
            mode,
        )?;
        self.active_cell = Some(next);
        Some(next)
    }

    fn is_filled(&self, row: usize, col: usize) -> bool {
        self.crossword
            .grid()
            .cell(row, col)
            .is_some_and(|cell| !cell.is_empty())
    }

    /// Enter the last letter of `input` at `(row, col)` and advance
    ///
    /// The first keystroke starts the timer. Accented vowels fold to their
    /// base letter; input without a letter changes nothing else. Typing into
    /// an idle session selects the cell first.
    pub fn type_letter(&mut self, row: usize, col: usize, input: &str) {
        if !self.is_open(row, col) || input.is_empty() {
            return;
        }
        if !self.timer_running {
            self.timer_running = true;
            debug!("timer started");
        }
        let Some(letter) = input.chars().next_back().and_then(fold_letter) else {
            return;
        };

        if self.active_cell.is_none() {
            self.active_cell = Some((row, col));
        }
        if let Some(cell) = self.crossword.grid_mut().cell_mut(row, col)
            && cell.current() != Some(letter)
        {
            cell.set_current(Some(letter));
        }
        self.step_from((row, col), Direction::Forward, StepMode::SkipFilled);
    }

    /// Clear a letter and move back one cell
    ///
    /// On a filled cell the letter is cleared and the cursor steps back. On an
    /// empty cell the cursor steps back and clears the letter it lands on.
    pub fn delete_letter(&mut self, row: usize, col: usize) {
        if !self.is_open(row, col) {
            return;
        }
        if self.is_filled(row, col) {
            self.clear(row, col);
            self.step_from((row, col), Direction::Backward, StepMode::Single);
        } else if let Some((r, c)) = self.step_from((row, col), Direction::Backward, StepMode::Single) {
            self.clear(r, c);
        }
    }

    /// Clear `(row, col)` without moving the cursor
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        if self.is_open(row, col) {
            self.clear(row, col);
        }
    }

    fn clear(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.crossword.grid_mut().cell_mut(row, col) {
            cell.set_current(None);
        }
    }

    /// Force the arrow's orientation and move one cell
    pub fn move_by_arrow(&mut self, arrow: Arrow) {
        self.orientation = arrow.orientation();
        if let Some(from) = self.active_cell {
            self.step_from(from, arrow.direction(), StepMode::Single);
        }
    }

    /// Step back one cell if `(row, col)` is already empty
    pub fn backspace_on_empty(&mut self, row: usize, col: usize) {
        if self.is_open(row, col) && !self.is_filled(row, col) {
            self.step_from((row, col), Direction::Backward, StepMode::Single);
        }
    }

    /// Fill every open cell with its solution, costing one hint
    pub fn reveal_answers(&mut self) {
        for cell in self.crossword.grid_mut().open_cells_mut() {
            cell.reveal();
        }
        self.hints_used += 1;
        self.timer_running = false;
        info!(hints = self.hints_used, "answers revealed");
    }

    /// Score the grid, pause the timer and record the match
    pub fn check_answers(&mut self) -> ScoreResult {
        let score = ScoreResult::from_grid(self.crossword.grid(), self.elapsed_seconds, self.hints_used);
        self.timer_running = false;
        self.last_score = Some(score);

        info!(
            correct = score.correct,
            total = score.total,
            final_score = score.final_score,
            "answers checked"
        );

        record_best_effort(
            self.sink.as_ref(),
            AnalyticsEvent::MatchPlayed {
                topic: self.topic.to_lowercase(),
                correct: score.correct,
                total: score.total,
                percentage: score.percentage,
                elapsed_seconds: score.elapsed_seconds,
                final_score: score.final_score,
                hints_used: self.hints_used,
                timestamp: Utc::now(),
            },
        );
        score
    }

    /// Hide the score and return to editing
    pub fn dismiss_review(&mut self) {
        self.last_score = None;
    }

    #[must_use]
    pub fn is_word_fully_correct(&self, word: &PlacedWord) -> bool {
        self.crossword.is_word_fully_correct(word)
    }

    /// One second of wall time; ignored unless the timer is running
    pub fn tick(&mut self) {
        if self.timer_running && self.last_score.is_none() {
            self.elapsed_seconds += 1;
        }
    }
}
