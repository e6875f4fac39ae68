//! Construction-time errors.
//!
//! Gameplay outcomes (blocked moves, failed rotations, game over) are plain
//! values on the game state, never errors. Only malformed input data that
//! makes the engine unusable is reported here.

use thiserror::Error;

use crate::types::{Coord, TetrominoKind};

/// The tetromino catalog is incomplete or inconsistent
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no shape definition for tetromino {0}")]
    MissingKind(TetrominoKind),

    #[error("tetromino {0} is defined more than once")]
    DuplicateKind(TetrominoKind),

    #[error("tetromino {0} has an empty wall-kick table")]
    EmptyKickTable(TetrominoKind),

    #[error("tetromino {kind} has no candidates in wall-kick row {row}")]
    EmptyKickRow { kind: TetrominoKind, row: usize },

    #[error("malformed catalog data: {0}")]
    Json(#[from] serde_json::Error),
}

/// The game configuration cannot describe a playable board
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be between 1x1 and {max}x{max}, got {width}x{height}")]
    BoardSize { width: u32, height: u32, max: u32 },

    #[error("spawn anchor ({}, {}) lies outside the board", .0.x, .0.y)]
    SpawnOutOfBounds(Coord),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
