//! Playfield canvas: the raster the game draws onto, in board cell units.
//!
//! It persists between frames, so while the loop is paused or over the last
//! frame stays on screen, like a real canvas.

use crate::core::Surface;
use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfieldCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    frames: u64,
}

impl PlayfieldCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            frames: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of times the background was filled (one per drawn frame).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }
}

impl Surface for PlayfieldCanvas {
    fn fill_background(&mut self) {
        self.cells.fill(None);
        self.frames += 1;
    }

    fn fill_cell(&mut self, x: i32, y: i32, kind: PieceKind) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Some(kind);
        }
    }
}
