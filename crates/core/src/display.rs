//! Display projection
//!
//! The host paints the game through a [`DisplaySink`]. The core calls it with
//! every visual change (the active piece moving, cells locking, rows
//! shifting, the field being wiped) and never reads anything back.

use crate::types::{Cell, Coord, Rect, TetrominoKind};

/// Receiver of cell paint notifications
pub trait DisplaySink {
    fn set_cell(&mut self, cell: Coord, tile: TetrominoKind);
    fn clear_cell(&mut self, cell: Coord);
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn set_cell(&mut self, cell: Coord, tile: TetrominoKind) {
        (**self).set_cell(cell, tile);
    }

    fn clear_cell(&mut self, cell: Coord) {
        (**self).clear_cell(cell);
    }
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn set_cell(&mut self, _cell: Coord, _tile: TetrominoKind) {}

    fn clear_cell(&mut self, _cell: Coord) {}
}

/// In-memory mirror of what a host would have painted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDisplay {
    bounds: Rect,
    cells: Vec<Cell>,
    writes: u64,
}

impl GridDisplay {
    pub fn new(bounds: Rect) -> Self {
        let len = (bounds.width() * bounds.height()) as usize;
        Self {
            bounds,
            cells: vec![None; len],
            writes: 0,
        }
    }

    fn index(&self, c: Coord) -> Option<usize> {
        if !self.bounds.contains(c) {
            return None;
        }
        let x = (c.x - self.bounds.x_min()) as usize;
        let y = (c.y - self.bounds.y_min()) as usize;
        Some(y * self.bounds.width() as usize + x)
    }

    pub fn tile(&self, c: Coord) -> Cell {
        self.index(c).and_then(|idx| self.cells[idx])
    }

    /// Number of notifications received so far
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// One line per row, top row first; `.` marks an empty cell
    pub fn render(&self) -> String {
        let b = self.bounds;
        let mut out = String::with_capacity(((b.width() + 1) * b.height()) as usize);
        for y in (b.y_min()..b.y_max()).rev() {
            for x in b.x_min()..b.x_max() {
                match self.tile(Coord::new(x, y)) {
                    Some(kind) => out.push_str(&kind.as_str().to_uppercase()),
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out
    }
}

impl DisplaySink for GridDisplay {
    fn set_cell(&mut self, cell: Coord, tile: TetrominoKind) {
        self.writes += 1;
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = Some(tile);
        }
    }

    fn clear_cell(&mut self, cell: Coord) {
        self.writes += 1;
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = None;
        }
    }
}
