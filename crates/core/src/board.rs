//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (12x20 by default) where each cell is
//! empty or holds settled material tagged with a piece kind.
//! Storage is a flat row-major vector; dimensions never change after creation.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use log::debug;

use crate::pieces::Player;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, ROW_CLEAR_BASE_POINTS};

/// Result of one [`Board::sweep`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepOutcome {
    /// Number of rows removed.
    pub rows_cleared: u32,
    /// Points awarded (10, 20, 40, ... per row within the sweep).
    pub points: u32,
}

/// The game grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `width x height` board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Whether the piece overlaps settled material or leaves the grid.
    ///
    /// Only occupied shape cells are tested; a cell outside the grid in any
    /// direction (left/right wall, floor, above the top) counts as a collision.
    pub fn collides(&self, player: &Player) -> bool {
        player
            .cells()
            .any(|(x, y, _)| !matches!(self.get(x, y), Some(None)))
    }

    /// Write every occupied cell of the piece into the grid.
    ///
    /// Callers merge only from a collision-free position; off-grid cells are skipped.
    pub fn merge(&mut self, player: &Player) {
        for (x, y, kind) in player.cells() {
            self.set(x, y, Some(kind));
        }
    }

    /// Remove row `y` and shift every row above it down by one, leaving an
    /// empty row on top.
    fn clear_row(&mut self, y: usize) {
        let width = self.width;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(None);
    }

    /// Clear full rows bottom to top and score them.
    ///
    /// After a removal the same row index is examined again, since the row
    /// that was above has just shifted into it. The first row cleared is worth
    /// 10 points and every further row in the same sweep is worth double the
    /// previous one.
    pub fn sweep(&mut self) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();
        // A zero-width row is vacuously full and would be re-checked forever.
        if self.width == 0 {
            return outcome;
        }

        let mut row_value: u32 = 1;
        let mut y = self.height;

        while y > 0 {
            let row = y - 1;
            if !self.is_row_full(row) {
                y -= 1;
                continue;
            }

            self.clear_row(row);
            outcome.rows_cleared += 1;
            outcome.points = outcome
                .points
                .saturating_add(row_value.saturating_mul(ROW_CLEAR_BASE_POINTS));
            row_value = row_value.saturating_mul(2);
        }

        if outcome.rows_cleared > 0 {
            debug!(
                "sweep cleared {} row(s) for {} points",
                outcome.rows_cleared, outcome.points
            );
        }
        outcome
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell; dimensions are kept
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Count of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Write numeric cell tags into a row-major grid (0 = empty)
    pub fn to_values(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.map_or(0, |k| k.cell_value())).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
