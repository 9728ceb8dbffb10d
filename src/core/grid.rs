//! Crossword grid storage
//!
//! A rectangular matrix of cells. The grid is a passive container: it knows
//! nothing about words, only about which cells are open and what they hold.

/// A single grid square
///
/// A cell is blocked exactly when it has no solution letter, so a blocked
/// cell can never carry a letter or a clue number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    current: Option<u8>,
    solution: Option<u8>,
    number: Option<u32>,
}

impl Cell {
    /// A blocked (black) square
    pub const BLOCKED: Self = Self {
        current: None,
        solution: None,
        number: None,
    };

    /// An open square whose answer is `letter`
    #[must_use]
    pub const fn open(letter: u8) -> Self {
        Self {
            current: None,
            solution: Some(letter),
            number: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.solution.is_none()
    }

    /// Letter currently entered by the solver
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Option<u8> {
        self.current
    }

    /// Letter the cell should hold
    #[inline]
    #[must_use]
    pub const fn solution(&self) -> Option<u8> {
        self.solution
    }

    /// Clue number printed in the corner, if any
    #[inline]
    #[must_use]
    pub const fn number(&self) -> Option<u32> {
        self.number
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// True for an open cell whose entered letter matches the solution
    #[inline]
    #[must_use]
    pub fn is_correct(&self) -> bool {
        !self.is_blocked() && self.current == self.solution
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        if !self.is_blocked() {
            self.number = Some(number);
        }
    }

    pub(crate) fn set_current(&mut self, letter: Option<u8>) {
        if !self.is_blocked() {
            self.current = letter;
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.current = self.solution;
    }
}

/// Rectangular cell matrix, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate an all-blocked `size × size` grid
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_dimensions(size, size)
    }

    /// Allocate an all-blocked `rows × cols` grid
    #[must_use]
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::BLOCKED; rows * cols],
        }
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Check signed coordinates against the grid bounds
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Read a cell; `None` when out of bounds
    #[inline]
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Read a cell using signed coordinates; `None` when out of bounds
    #[inline]
    #[must_use]
    pub fn get(&self, row: isize, col: isize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            self.cell(row as usize, col as usize)
        } else {
            None
        }
    }

    /// True when the position is inside the grid and not blocked
    #[inline]
    #[must_use]
    pub fn is_open(&self, row: isize, col: isize) -> bool {
        self.get(row, col).is_some_and(|cell| !cell.is_blocked())
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(slot) = self.cell_mut(row, col) {
            *slot = cell;
        }
    }

    /// Iterate over all open cells with their coordinates, row-major
    pub fn open_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_blocked())
            .map(|(i, cell)| (i / self.cols, i % self.cols, cell))
    }

    pub(crate) fn open_cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().filter(|cell| !cell.is_blocked())
    }

    /// Iterate over one row of cells
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Cell> {
        let start = (row * self.cols).min(self.cells.len());
        let end = ((row + 1) * self.cols).min(self.cells.len());
        self.cells[start..end].iter()
    }

    /// Copy the `rows × cols` window whose top-left corner is `(row, col)`
    ///
    /// The window is clipped to the grid.
    #[must_use]
    pub fn slice(&self, row: usize, col: usize, rows: usize, cols: usize) -> Self {
        let rows = rows.min(self.rows.saturating_sub(row));
        let cols = cols.min(self.cols.saturating_sub(col));
        let mut out = Self::with_dimensions(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                if let Some(&cell) = self.cell(row + r, col + c) {
                    out.set(r, c, cell);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_blocked() {
        let grid = Grid::new(5);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.open_cells().count(), 0);
        assert!(grid.cell(4, 4).unwrap().is_blocked());
    }

    #[test]
    fn bounds_checks() {
        let grid = Grid::with_dimensions(3, 4);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(2, 3));
        assert!(!grid.in_bounds(3, 0));
        assert!(!grid.in_bounds(0, 4));
        assert!(!grid.in_bounds(-1, 0));
        assert!(grid.get(0, -1).is_none());
        assert!(grid.cell(3, 0).is_none());
    }

    #[test]
    fn open_cell_round_trip() {
        let mut grid = Grid::new(3);
        grid.set(1, 2, Cell::open(b'A'));

        let cell = grid.cell(1, 2).unwrap();
        assert!(!cell.is_blocked());
        assert_eq!(cell.solution(), Some(b'A'));
        assert!(cell.is_empty());
        assert!(grid.is_open(1, 2));
        assert!(!grid.is_open(1, 1));

        let open: Vec<_> = grid.open_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(open, vec![(1, 2)]);
    }

    #[test]
    fn blocked_cell_ignores_letters_and_numbers() {
        let mut cell = Cell::BLOCKED;
        cell.set_current(Some(b'X'));
        cell.set_number(3);
        assert_eq!(cell, Cell::BLOCKED);
        assert!(!cell.is_correct());
    }

    #[test]
    fn correctness_and_reveal() {
        let mut cell = Cell::open(b'S');
        assert!(!cell.is_correct());

        cell.set_current(Some(b'T'));
        assert!(!cell.is_correct());

        cell.reveal();
        assert!(cell.is_correct());
        assert_eq!(cell.current(), Some(b'S'));
    }

    #[test]
    fn slice_copies_window() {
        let mut grid = Grid::new(5);
        grid.set(2, 2, Cell::open(b'Q'));
        grid.set(2, 3, Cell::open(b'R'));

        let sub = grid.slice(1, 1, 3, 4);
        assert_eq!(sub.rows(), 3);
        assert_eq!(sub.cols(), 4);
        assert_eq!(sub.cell(1, 1).unwrap().solution(), Some(b'Q'));
        assert_eq!(sub.cell(1, 2).unwrap().solution(), Some(b'R'));

        let clipped = grid.slice(3, 3, 10, 10);
        assert_eq!((clipped.rows(), clipped.cols()), (2, 2));
    }

    #[test]
    fn row_iteration() {
        let mut grid = Grid::with_dimensions(2, 3);
        grid.set(1, 0, Cell::open(b'A'));
        let second: Vec<bool> = grid.row(1).map(Cell::is_blocked).collect();
        assert_eq!(second, vec![false, true, true]);
    }
}
