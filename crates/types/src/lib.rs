//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data (plus `serde` derives for configuration files),
//! usable by the rules core, a host renderer, or a test harness alike.
//!
//! # Coordinate System
//!
//! Cells are addressed by integer [`Coord`]s with `y` growing **upward**.
//! The playfield is centered on the origin:
//!
//! - **Width 10**: columns `-5..5`
//! - **Height 20**: rows `-10..10`
//! - **Spawn anchor**: `(-1, 8)`, so the top row of a spawned piece sits on row 9
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Typical host frame interval (~60 FPS) |
//! | `STEP_DELAY_MS` | 1000 | Time between automatic descents |
//! | `MOVE_DELAY_MS` | 100 | Time between repeated held-key moves |
//! | `LOCK_DELAY_MS` | 500 | Resting time before a piece locks |
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{Coord, Rect, RotationDirection, TetrominoKind};
//!
//! let kind = TetrominoKind::from_str("t").unwrap();
//! assert_eq!(kind, TetrominoKind::T);
//!
//! let bounds = Rect::centered(10, 20);
//! assert_eq!((bounds.x_min(), bounds.x_max()), (-5, 5));
//! assert_eq!((bounds.y_min(), bounds.y_max()), (-10, 10));
//! assert!(bounds.contains(Coord::new(-1, 8)));
//!
//! assert_eq!(RotationDirection::CounterClockwise.sign(), -1);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: u32 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: u32 = 20;

/// Default spawn anchor
pub const DEFAULT_SPAWN: Coord = Coord::new(-1, 8);

/// Typical host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time between automatic one-cell descents (1 second per row)
pub const STEP_DELAY_MS: u32 = 1000;

/// Time between repeated moves while a direction is held
pub const MOVE_DELAY_MS: u32 = 100;

/// Accumulated resting time before a piece is locked
pub const LOCK_DELAY_MS: u32 = 500;

/// Every tetromino has exactly four cells
pub const CELLS_PER_PIECE: usize = 4;

/// Number of rotation states
pub const ROTATION_STATES: i32 = 4;

/// Maximum number of wall-kick candidates tried for one rotation
pub const MAX_KICKS: usize = 5;

/// The seven tetromino kinds
///
/// The kind doubles as the tile identity painted into the playfield, so a
/// host can pick a color per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TetrominoKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl TetrominoKind {
    /// All kinds, in catalog order
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::J,
        TetrominoKind::L,
        TetrominoKind::S,
        TetrominoKind::Z,
    ];

    /// Position of this kind in [`TetrominoKind::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// ```
    /// use stackfall_types::TetrominoKind;
    ///
    /// assert_eq!(TetrominoKind::from_str("i"), Some(TetrominoKind::I));
    /// assert_eq!(TetrominoKind::from_str("Z"), Some(TetrominoKind::Z));
    /// assert_eq!(TetrominoKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoKind::I),
            "o" => Some(TetrominoKind::O),
            "t" => Some(TetrominoKind::T),
            "j" => Some(TetrominoKind::J),
            "l" => Some(TetrominoKind::L),
            "s" => Some(TetrominoKind::S),
            "z" => Some(TetrominoKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoKind::I => "i",
            TetrominoKind::O => "o",
            TetrominoKind::T => "t",
            TetrominoKind::J => "j",
            TetrominoKind::L => "l",
            TetrominoKind::S => "s",
            TetrominoKind::Z => "z",
        }
    }
}

impl fmt::Display for TetrominoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Debug>::fmt(self, f)
    }
}

/// A cell on the playfield
///
/// - `None`: Empty cell
/// - `Some(kind)`: Cell painted by a piece of that kind
pub type Cell = Option<TetrominoKind>;

/// Integer cell coordinate (or translation), `y` pointing up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ZERO: Coord = Coord::new(0, 0);
    pub const DOWN: Coord = Coord::new(0, -1);
    pub const LEFT: Coord = Coord::new(-1, 0);
    pub const RIGHT: Coord = Coord::new(1, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;
    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y)
    }
}

/// Half-open rectangle `[x_min, x_max) × [y_min, y_max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    min: Coord,
    width: i32,
    height: i32,
}

impl Rect {
    pub const fn new(min: Coord, width: i32, height: i32) -> Self {
        Self { min, width, height }
    }

    /// Rectangle of the given size centered on the origin
    ///
    /// The minimum corner is `(-width / 2, -height / 2)` with integer
    /// division, so odd sizes get the extra column/row on the positive side.
    pub const fn centered(width: u32, height: u32) -> Self {
        let width = width as i32;
        let height = height as i32;
        Self::new(Coord::new(-width / 2, -height / 2), width, height)
    }

    pub fn x_min(&self) -> i32 {
        self.min.x
    }

    pub fn x_max(&self) -> i32 {
        self.min.x + self.width
    }

    pub fn y_min(&self) -> i32 {
        self.min.y
    }

    pub fn y_max(&self) -> i32 {
        self.min.y + self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x_min() && c.x < self.x_max() && c.y >= self.y_min() && c.y < self.y_max()
    }
}

/// Direction of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    /// 90° clockwise (+1)
    Clockwise,
    /// 90° counter-clockwise (-1)
    CounterClockwise,
}

impl RotationDirection {
    pub fn sign(self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

/// Per-tick snapshot of player intent, supplied by the host
///
/// The rotate and hard-drop flags mean "pressed this tick"; the directional
/// flags mean "currently held".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InputSnapshot {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub hard_drop: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    /// No input at all
    pub const IDLE: InputSnapshot = InputSnapshot {
        rotate_left: false,
        rotate_right: false,
        hard_drop: false,
        down: false,
        left: false,
        right: false,
    };
}
