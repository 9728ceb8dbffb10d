//! Cursor stepping along an answer

use crate::core::{Grid, Orientation, PlacedWord};

/// Direction of travel along the active orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    const fn sign(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// Orientation an arrow forces on the session
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Up | Self::Down => Orientation::Vertical,
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Right | Self::Down => Direction::Forward,
            Self::Left | Self::Up => Direction::Backward,
        }
    }
}

/// How far a step may travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepMode {
    /// Move exactly one cell
    Single,
    /// Move to the next empty cell, skipping filled ones
    SkipFilled,
}

/// Where the cursor lands after stepping from `from`, or `None` to stay put
///
/// A step aborts when it leaves the grid, reaches a blocked cell, or leaves
/// the span of `word`. Without an active word only the first two apply.
/// In `SkipFilled` mode at most `word.len()` cells are visited.
pub(crate) fn step(
    grid: &Grid,
    word: Option<&PlacedWord>,
    from: (usize, usize),
    orientation: Orientation,
    direction: Direction,
    mode: StepMode,
) -> Option<(usize, usize)> {
    let (dr, dc) = orientation.delta();
    let sign = direction.sign();
    let budget = match mode {
        StepMode::Single => 1,
        StepMode::SkipFilled => word.map_or(1, PlacedWord::len),
    };

    let (mut row, mut col) = (from.0 as isize, from.1 as isize);
    for _ in 0..budget {
        row += dr * sign;
        col += dc * sign;

        let cell = grid.get(row, col).filter(|cell| !cell.is_blocked())?;
        let target = (row as usize, col as usize);
        if word.is_some_and(|w| !w.contains(target.0, target.1)) {
            return None;
        }

        if mode == StepMode::Single || cell.is_empty() {
            return Some(target);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    /// `ORBIT` across row 1 from column 1 in a 3x7 grid
    fn setup() -> (Grid, PlacedWord) {
        let mut grid = Grid::with_dimensions(3, 7);
        let word = PlacedWord {
            word: "ORBIT".into(),
            clue: String::new(),
            row: 1,
            col: 1,
            orientation: Orientation::Horizontal,
            number: 1,
        };
        for ((r, c), &b) in word.cells().zip(b"ORBIT") {
            grid.set(r, c, Cell::open(b));
        }
        (grid, word)
    }

    fn fill(grid: &mut Grid, col: usize) {
        grid.cell_mut(1, col).unwrap().set_current(Some(b'X'));
    }

    #[test]
    fn forward_lands_on_next_empty() {
        let (grid, word) = setup();
        let next = step(
            &grid,
            Some(&word),
            (1, 1),
            Orientation::Horizontal,
            Direction::Forward,
            StepMode::SkipFilled,
        );
        assert_eq!(next, Some((1, 2)));
    }

    #[test]
    fn forward_skips_filled_cells() {
        let (mut grid, word) = setup();
        fill(&mut grid, 2);
        fill(&mut grid, 3);
        let next = step(
            &grid,
            Some(&word),
            (1, 1),
            Orientation::Horizontal,
            Direction::Forward,
            StepMode::SkipFilled,
        );
        assert_eq!(next, Some((1, 4)));
    }

    #[test]
    fn all_filled_stays_put() {
        let (mut grid, word) = setup();
        for col in 2..=5 {
            fill(&mut grid, col);
        }
        let next = step(
            &grid,
            Some(&word),
            (1, 1),
            Orientation::Horizontal,
            Direction::Forward,
            StepMode::SkipFilled,
        );
        assert_eq!(next, None);
    }

    #[test]
    fn end_of_word_stays_put() {
        let (grid, word) = setup();
        for direction in [Direction::Forward, Direction::Backward] {
            let from = if direction == Direction::Forward { (1, 5) } else { (1, 1) };
            let next = step(
                &grid,
                Some(&word),
                from,
                Orientation::Horizontal,
                direction,
                StepMode::Single,
            );
            assert_eq!(next, None);
        }
    }

    #[test]
    fn single_step_ignores_fill() {
        let (mut grid, word) = setup();
        fill(&mut grid, 2);
        let next = step(
            &grid,
            Some(&word),
            (1, 3),
            Orientation::Horizontal,
            Direction::Backward,
            StepMode::Single,
        );
        assert_eq!(next, Some((1, 2)));
    }

    #[test]
    fn blocked_and_out_of_bounds_abort() {
        let (grid, _) = setup();
        // Row 0 is blocked above the answer
        let up = step(
            &grid,
            None,
            (1, 2),
            Orientation::Vertical,
            Direction::Backward,
            StepMode::Single,
        );
        assert_eq!(up, None);

        let mut edge = Grid::with_dimensions(1, 2);
        edge.set(0, 0, Cell::open(b'A'));
        edge.set(0, 1, Cell::open(b'B'));
        let off = step(
            &edge,
            None,
            (0, 1),
            Orientation::Horizontal,
            Direction::Forward,
            StepMode::Single,
        );
        assert_eq!(off, None);
    }

    #[test]
    fn arrows_map_to_orientation_and_direction() {
        assert_eq!(Arrow::Right.orientation(), Orientation::Horizontal);
        assert_eq!(Arrow::Up.orientation(), Orientation::Vertical);
        assert_eq!(Arrow::Left.direction(), Direction::Backward);
        assert_eq!(Arrow::Down.direction(), Direction::Forward);
    }
}
