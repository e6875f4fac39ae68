//! Playfield module - manages the committed cells
//!
//! The playfield is a fixed-size grid centered on the origin where each cell is
//! either empty or holds the kind of the piece that was locked into it.
//! Storage is a flat row-major vector starting at the bottom row (`y_min`).
//!
//! The active piece never lives here; only [`Playfield::set_cells`] (called on
//! lock) writes occupied cells.

use arrayvec::ArrayVec;

use crate::types::{
    Cell, Coord, Rect, TetrominoKind, CELLS_PER_PIECE, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH,
};

/// Scan indices of the rows removed by one [`Playfield::clear_full_rows`]
///
/// A locked piece spans at most four rows, so a lock never completes more.
pub type ClearedRows = ArrayVec<i32, CELLS_PER_PIECE>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    bounds: Rect,
    /// Row-major, `(y - y_min) * width + (x - x_min)`
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty playfield of the given size, centered on the origin
    pub fn new(width: u32, height: u32) -> Self {
        let bounds = Rect::centered(width, height);
        Self {
            bounds,
            cells: vec![None; (width as usize) * (height as usize)],
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn width(&self) -> usize {
        self.bounds.width() as usize
    }

    /// Calculate flat index of a cell, `None` if out of bounds
    #[inline]
    fn index(&self, c: Coord) -> Option<usize> {
        if !self.bounds.contains(c) {
            return None;
        }
        let x = (c.x - self.bounds.x_min()) as usize;
        let y = (c.y - self.bounds.y_min()) as usize;
        Some(y * self.width() + x)
    }

    fn row_range(&self, row: i32) -> std::ops::Range<usize> {
        let start = (row - self.bounds.y_min()) as usize * self.width();
        start..start + self.width()
    }

    /// Tile at a cell; `None` when empty or out of bounds
    pub fn tile(&self, c: Coord) -> Cell {
        self.index(c).and_then(|idx| self.cells[idx])
    }

    /// Check if a cell holds a tile (out-of-bounds cells never do)
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.tile(c).is_some()
    }

    /// Write `tile` into every cell
    ///
    /// Callers check [`Playfield::is_valid_position`] first; out-of-bounds
    /// cells are never stored.
    pub fn set_cells(&mut self, cells: &[Coord], tile: TetrominoKind) {
        for &c in cells {
            debug_assert!(self.bounds.contains(c), "set_cells out of bounds: {c:?}");
            if let Some(idx) = self.index(c) {
                self.cells[idx] = Some(tile);
            }
        }
    }

    pub fn clear_cells(&mut self, cells: &[Coord]) {
        for &c in cells {
            if let Some(idx) = self.index(c) {
                self.cells[idx] = None;
            }
        }
    }

    /// Check that every cell is within bounds and empty
    pub fn is_valid_position(&self, cells: &[Coord]) -> bool {
        cells
            .iter()
            .all(|&c| matches!(self.index(c), Some(idx) if self.cells[idx].is_none()))
    }

    /// Check if every column of a row is occupied
    pub fn is_row_full(&self, row: i32) -> bool {
        if row < self.bounds.y_min() || row >= self.bounds.y_max() {
            return false;
        }
        self.cells[self.row_range(row)].iter().all(Option::is_some)
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: i32) -> Option<&[Cell]> {
        if row < self.bounds.y_min() || row >= self.bounds.y_max() {
            return None;
        }
        Some(&self.cells[self.row_range(row)])
    }

    /// Remove every full row, compacting the rows above downward
    ///
    /// Scans upward from `y_min`. After a removal the same index is checked
    /// again, since the row that was above has just moved into it. Returns
    /// the index each removal happened at, e.g. `[y_min, y_min]` when the two
    /// bottom rows were full. Removals past the fourth (only reachable by
    /// filling rows directly) still happen but are not recorded.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut row = self.bounds.y_min();

        while row < self.bounds.y_max() {
            if self.is_row_full(row) {
                self.remove_row(row);
                let _ = cleared.try_push(row);
            } else {
                row += 1;
            }
        }

        cleared
    }

    /// Shift every row above `row` down by one and empty the top row
    fn remove_row(&mut self, row: i32) {
        let above = self.row_range(row + 1).start;
        let dst = self.row_range(row).start;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(above.., dst);

        let top = self.row_range(self.bounds.y_max() - 1);
        self.cells[top].fill(None);
    }

    /// Empty the whole field
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Every occupied cell with its tile, bottom row first
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Coord, TetrominoKind)> + '_ {
        let width = self.width();
        let min = Coord::new(self.bounds.x_min(), self.bounds.y_min());
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let kind = (*cell)?;
            let c = Coord::new((idx % width) as i32, (idx / width) as i32);
            Some((min + c, kind))
        })
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
