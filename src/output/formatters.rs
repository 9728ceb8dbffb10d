//! Formatting utilities for terminal output

use crate::core::{Cell, ClueEntry, Grid};

/// Three-column label for a cell: right-aligned number, then a letter
///
/// Open cells show their solution when `show_solution` is set and a middle
/// dot otherwise. Blocked cells are blank.
#[must_use]
pub fn cell_label(cell: &Cell, show_solution: bool) -> String {
    if cell.is_blocked() {
        return "   ".to_string();
    }
    let number = cell.number().map_or_else(String::new, |n| n.to_string());
    let letter = if show_solution {
        cell.solution().map_or('·', char::from)
    } else {
        cell.current().map_or('·', char::from)
    };
    format!("{number:>2}{letter}")
}

/// Plain-text rows of `grid`, one string per row
#[must_use]
pub fn grid_rows(grid: &Grid, show_solution: bool) -> Vec<String> {
    (0..grid.rows())
        .map(|r| {
            grid.row(r)
                .map(|cell| cell_label(cell, show_solution))
                .collect::<String>()
        })
        .collect()
}

/// `"12. Clue (5)"`
#[must_use]
pub fn clue_line(entry: &ClueEntry) -> String {
    format!("{}. {} ({})", entry.number, entry.clue, entry.answer_length)
}

/// `MM:SS`, growing to more minute digits past an hour
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
