//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every piece is a small square matrix of cells. The matrix is owned by the
//! active piece and rotated in place; collision resolution after a rotation
//! lives in [`crate::game_state`].

use crate::types::{Cell, PieceKind, MAX_SHAPE_SIZE};

/// Square shape matrix of side 2, 3 or 4 stored in a fixed 4x4 buffer.
///
/// Cells outside `size x size` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of numeric cell tags (`0` = empty, `1..=7` = piece).
    ///
    /// Panics if the rows do not form a square of side at most 4 or contain a
    /// tag above 7: shapes are only built from the fixed catalog.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(
            (1..=MAX_SHAPE_SIZE).contains(&size),
            "shape side must be 1..={MAX_SHAPE_SIZE}, got {size}"
        );

        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape rows must form a square");
            for (x, &v) in row.iter().enumerate() {
                assert!(v <= 7, "cell tag out of range: {v}");
                cells[y][x] = PieceKind::from_cell_value(v);
            }
        }

        Self { size, cells }
    }

    /// Side length of the matrix (row count == column count).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at (row, col); empty outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row][col]
    }

    /// Iterate the matrix rows, each trimmed to `size` columns.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.size].iter().map(|row| &row[..self.size])
    }

    /// Occupied cells as `(row, col, kind)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, PieceKind)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|kind| (y, x, kind)))
        })
    }

    /// Numeric tags, row by row (handy for assertions and logging).
    pub fn to_values(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.map_or(0, |k| k.cell_value())).collect())
            .collect()
    }

    /// Rotate 90 degrees in place: clockwise when `direction > 0`,
    /// counter-clockwise otherwise.
    pub fn rotate(&mut self, direction: i32) {
        let n = self.size;

        // Transpose.
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[x][y];
                self.cells[x][y] = self.cells[y][x];
                self.cells[y][x] = tmp;
            }
        }

        if direction > 0 {
            for row in &mut self.cells[..n] {
                row[..n].reverse();
            }
        } else {
            self.cells[..n].reverse();
        }
    }
}

/// Create a fresh shape matrix for a piece kind in its spawn orientation.
pub fn create_piece(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => Shape::from_rows(&[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]]),
        PieceKind::O => Shape::from_rows(&[&[2, 2], &[2, 2]]),
        PieceKind::L => Shape::from_rows(&[&[0, 3, 0], &[0, 3, 0], &[0, 3, 3]]),
        PieceKind::J => Shape::from_rows(&[&[0, 4, 0], &[0, 4, 0], &[4, 4, 0]]),
        PieceKind::I => Shape::from_rows(&[
            &[0, 5, 0, 0],
            &[0, 5, 0, 0],
            &[0, 5, 0, 0],
            &[0, 5, 0, 0],
        ]),
        PieceKind::S => Shape::from_rows(&[&[0, 6, 6], &[6, 6, 0], &[0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]]),
    }
}

/// Active falling piece: a shape matrix and the grid offset of its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub shape: Shape,
}

impl Player {
    pub fn new(shape: Shape, x: i32, y: i32) -> Self {
        Self { x, y, shape }
    }

    /// Occupied cells translated into grid coordinates as `(x, y, kind)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        self.shape
            .occupied()
            .map(move |(py, px, kind)| (self.x + px as i32, self.y + py as i32, kind))
    }
}
