//! Active piece - position, rotation and the wall-kick search
//!
//! An [`ActivePiece`] only knows its geometry. The game state owns the clocks
//! and resets them whenever a move here reports success.

use std::fmt;

use tracing::trace;

use crate::catalog::{Pivot, ShapeDefinition};
use crate::playfield::Playfield;
use crate::types::{Coord, RotationDirection, TetrominoKind, CELLS_PER_PIECE, ROTATION_STATES};

/// Local cell offsets of a piece
pub type PieceCells = [Coord; CELLS_PER_PIECE];

/// Wrap `input` into `[min, max)`
///
/// Only ever takes the remainder of non-negative operands, so the result does
/// not depend on how `%` treats negative numbers.
pub fn wrap(input: i32, min: i32, max: i32) -> i32 {
    debug_assert!(max > min, "empty wrap range {min}..{max}");
    let span = max - min;
    if input < min {
        let r = (min - input) % span;
        if r == 0 {
            min
        } else {
            max - r
        }
    } else {
        min + (input - min) % span
    }
}

/// Row of the wall-kick table for a rotation starting at `from_rotation`
pub fn wall_kick_index(from_rotation: i32, direction: RotationDirection, rows: usize) -> usize {
    let mut index = from_rotation * 2;
    if direction == RotationDirection::CounterClockwise {
        index -= 1;
    }
    wrap(index, 0, rows as i32) as usize
}

/// Round `v / 2` toward positive infinity
fn ceil_half(v: i32) -> i32 {
    (v + 1).div_euclid(2)
}

/// Rotate one local offset by 90° in `direction` about `pivot`
pub fn rotate_offset(cell: Coord, pivot: Pivot, direction: RotationDirection) -> Coord {
    let d = direction.sign();
    match pivot {
        Pivot::Cell => Coord::new(cell.y * d, -cell.x * d),
        Pivot::Corner => {
            // Half-cell units relative to (0.5, 0.5) keep the pivot exact.
            let hx = 2 * cell.x - 1;
            let hy = 2 * cell.y - 1;
            Coord::new(ceil_half(hy * d), ceil_half(-hx * d))
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ActivePiece<'c> {
    shape: &'c ShapeDefinition,
    cells: PieceCells,
    position: Coord,
    rotation: i32,
}

impl<'c> ActivePiece<'c> {
    /// Place a fresh piece at `position` in rotation state 0
    ///
    /// Placement is not validated here; the caller decides what a blocked
    /// spawn means.
    pub fn spawn(shape: &'c ShapeDefinition, position: Coord) -> Self {
        Self {
            shape,
            cells: shape.cells,
            position,
            rotation: 0,
        }
    }

    pub fn kind(&self) -> TetrominoKind {
        self.shape.kind
    }

    /// Local offsets for the current rotation
    pub fn cells(&self) -> &PieceCells {
        &self.cells
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    /// Rotation index in `0..4`
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Board cells if the piece were anchored at `position`
    pub fn cells_at(&self, position: Coord) -> PieceCells {
        self.cells.map(|c| c + position)
    }

    pub fn world_cells(&self) -> PieceCells {
        self.cells_at(self.position)
    }

    pub fn is_valid(&self, field: &Playfield) -> bool {
        field.is_valid_position(&self.world_cells())
    }

    pub fn can_move(&self, field: &Playfield, translation: Coord) -> bool {
        field.is_valid_position(&self.cells_at(self.position + translation))
    }

    /// True when the piece cannot descend any further
    pub fn is_resting(&self, field: &Playfield) -> bool {
        !self.can_move(field, Coord::DOWN)
    }

    /// Number of rows the piece can fall before resting
    pub fn drop_distance(&self, field: &Playfield) -> i32 {
        let mut distance = 0;
        while self.can_move(field, Coord::new(0, -(distance + 1))) {
            distance += 1;
        }
        distance
    }

    /// Translate the piece if the target is free; returns whether it moved
    pub fn try_move(&mut self, field: &Playfield, translation: Coord) -> bool {
        let valid = self.can_move(field, translation);
        if valid {
            self.position += translation;
        }
        valid
    }

    /// Rotate with wall kicks
    ///
    /// Returns the kick translation that made the rotation fit. On `None` the
    /// piece is exactly as it was before the call.
    pub fn try_rotate(&mut self, field: &Playfield, direction: RotationDirection) -> Option<Coord> {
        let shape = self.shape;
        let from = self.rotation;
        let original = self.cells;

        self.rotation = wrap(from + direction.sign(), 0, ROTATION_STATES);
        self.cells = original.map(|c| rotate_offset(c, shape.pivot, direction));

        let kicks = &shape.wall_kicks;
        let row = &kicks[wall_kick_index(from, direction, kicks.len())];
        for &kick in row {
            if self.try_move(field, kick) {
                trace!(kind = %self.kind(), from, to = self.rotation, ?kick, "rotated");
                return Some(kick);
            }
        }

        self.rotation = from;
        self.cells = original;
        None
    }
}

impl fmt::Debug for ActivePiece<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivePiece")
            .field("kind", &self.kind())
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("cells", &self.cells)
            .finish()
    }
}
