//! Cropping a working grid to its content

use crate::core::{Grid, PlacedWord};

/// Crop `grid` to the bounding box of its open cells plus a one-cell margin
///
/// The margin is clipped to the original bounds. Placed answers are re-based
/// onto the cropped grid. A grid with no open cells is returned unchanged.
#[must_use]
pub fn trim(grid: &Grid, placed: &[PlacedWord]) -> (Grid, Vec<PlacedWord>) {
    let Some((min_row, max_row, min_col, max_col)) = bounding_box(grid) else {
        return (grid.clone(), placed.to_vec());
    };

    let top = min_row.saturating_sub(1);
    let left = min_col.saturating_sub(1);
    let bottom = (max_row + 1).min(grid.rows() - 1);
    let right = (max_col + 1).min(grid.cols() - 1);

    let trimmed = grid.slice(top, left, bottom - top + 1, right - left + 1);
    let rebased = placed
        .iter()
        .map(|word| PlacedWord {
            row: word.row - top,
            col: word.col - left,
            ..word.clone()
        })
        .collect();

    (trimmed, rebased)
}

/// `(min_row, max_row, min_col, max_col)` over open cells
fn bounding_box(grid: &Grid) -> Option<(usize, usize, usize, usize)> {
    grid.open_cells()
        .fold(None, |acc, (row, col, _)| match acc {
            None => Some((row, row, col, col)),
            Some((r0, r1, c0, c1)) => Some((r0.min(row), r1.max(row), c0.min(col), c1.max(col))),
        })
}
